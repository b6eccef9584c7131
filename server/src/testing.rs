use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;
use uuid::Uuid;

use driver::clock::FixedClock;
use driver::database::{
    InMemoryCustomerRepository, InMemoryDatabase, InMemoryMovieRepository,
    InMemoryRentalRepository,
};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::MovieQuery;
use kernel::interface::update::{CustomerModifier, MovieModifier, RentalModifier};
use kernel::prelude::entity::{
    Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, DateOut, IsGold, Movie,
    MovieGenre, MovieId, MovieTitle, NumberInStock, Rental, RentalId,
};

use crate::auth::{TokenAuthority, AUTH_TOKEN_HEADER};
use crate::handler::{AppModule, Handler, Modules};
use crate::route::router;

/// In-memory application driven through the full router.
pub struct TestApp {
    module: AppModule<Handler<InMemoryDatabase, FixedClock>>,
    database: InMemoryDatabase,
    customer: Customer,
    movie: Movie,
}

impl TestApp {
    /// One customer and one movie with a single copy in stock at 2 per day.
    pub async fn new(now: OffsetDateTime) -> Self {
        let database = InMemoryDatabase::new();
        let handler = Handler::new(
            database.clone(),
            FixedClock::new(now),
            TokenAuthority::new(b"12345", Duration::hours(1)),
        );
        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new("12345"),
            CustomerPhone::new("12345"),
            IsGold::new(false),
        );
        let movie = Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new("12345"),
            MovieGenre::new("12345"),
            NumberInStock::new(1),
            DailyRentalRate::new(Decimal::from(2)),
        );

        let mut con = database.transact().await.unwrap();
        InMemoryCustomerRepository
            .create(&mut con, &customer)
            .await
            .unwrap();
        InMemoryMovieRepository.create(&mut con, &movie).await.unwrap();
        con.commit().await.unwrap();

        Self {
            module: AppModule::new(handler),
            database,
            customer,
            movie,
        }
    }

    pub fn customer_id(&self) -> Uuid {
        *self.customer.id().as_ref()
    }

    pub fn movie_id(&self) -> Uuid {
        *self.movie.id().as_ref()
    }

    pub fn payload(&self) -> Value {
        json!({
            "customerId": self.customer_id(),
            "movieId": self.movie_id(),
        })
    }

    pub fn token(&self) -> String {
        self.module
            .authority()
            .issue(Uuid::new_v4(), false, OffsetDateTime::now_utc())
            .unwrap()
    }

    pub async fn rent_since(&self, date_out: OffsetDateTime) -> Rental {
        let rental = Rental::checkout(
            RentalId::new(Uuid::new_v4()),
            &self.customer,
            &self.movie,
            DateOut::new(date_out),
        );
        self.save(&rental).await;
        rental
    }

    /// Stores the rental as given, replacing any record with the same id.
    pub async fn save(&self, rental: &Rental) {
        let mut con = self.database.transact().await.unwrap();
        InMemoryRentalRepository
            .create(&mut con, rental)
            .await
            .unwrap();
        con.commit().await.unwrap();
    }

    pub async fn stock(&self) -> i32 {
        let mut con = self.database.transact().await.unwrap();
        let movie = InMemoryMovieRepository
            .find_by_id(&mut con, self.movie.id())
            .await
            .unwrap()
            .unwrap();
        *movie.number_in_stock().as_ref()
    }

    /// Runs the request through the full router. Plain-text bodies come back
    /// as a JSON string.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(self.module.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    payload: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTH_TOKEN_HEADER, token);
    }
    match payload {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

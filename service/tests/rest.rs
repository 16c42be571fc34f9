//! Tests of the REST backend client against a mocked HTTP server.

use std::time::Duration;

use common::{
    money::Currency,
    operations::{By, Perform, Select},
};
use reqwest::StatusCode;
use secrecy::SecretBox;
use serde_json::{json, Value};
use service::{
    command::{
        self, CounterOffer, CreateOffer, CreateUserSession, RefreshOffers,
        TransitionOffer,
    },
    domain::{
        offer::{self, Status, Transition},
        user::{session::Token, Password, Role, Username},
        Offer,
    },
    infra::{api, rest, Rest},
    query,
    read::{offer::list::Scope, package::list},
    Command as _, Config, Service,
};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Access token of a transporter with `user_id: 7`, expiring in 2100.
const TRANSPORTER_JWT: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
    eyJ0b2tlbl90eXBlIjoiYWNjZXNzIiwiZXhwIjo0MTAyNDQ0ODAwLCJ1c2VyX2lkIjo3LC\
    Jpc19vd25lciI6ZmFsc2UsImlzX3RyYW5zcG9ydGVyIjp0cnVlfQ.c2lnbmF0dXJl";

fn package_json(id: u64, title: &str, price: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "pickup_location": "Pune",
        "drop_location": "Nagpur",
        "weight": 800.0,
        "price_expectation": price,
        "images": null,
        "status": "Negotiating",
        "create_at": format!("2024-05-{id:02}"),
    })
}

fn offer_json(id: u64, status: &str, price: &str) -> Value {
    json!({
        "id": id,
        "package": package_json(3, "Steel rods", "1000.00"),
        "package_id": 3,
        "sender": {"id": 2, "username": "ravi", "company_name": null},
        "offer_price": price,
        "status": status,
        "changed_by_owner": false,
        "created_at": "2024-05-02T10:00:00.123456Z",
    })
}

fn client(server: &MockServer, style: rest::Style) -> Rest {
    Rest::new(&rest::Config {
        base_url: format!("{}/api", server.uri()),
        style,
        timeout: Duration::from_secs(5),
        currency: Currency::Inr,
    })
    .unwrap()
    .with_access_token(Token::new("access-token").unwrap().into_secret())
}

async fn refreshed_service(
    server: &MockServer,
    style: rest::Style,
) -> Service<Rest> {
    Mock::given(method("GET"))
        .and(path("/api/offers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            offer_json(6, "pending", "900.00"),
            offer_json(7, "pending", "1000.00"),
        ])))
        .mount(server)
        .await;

    let svc = Service::new(Config::default(), client(server, style));
    let _ = svc.execute(RefreshOffers { scope: Scope::All }).await.unwrap();
    svc
}

fn change(id: u64, transition: Transition) -> Perform<offer::Change> {
    Perform(offer::Change {
        id: id.into(),
        transition,
    })
}

#[tokio::test]
async fn lists_offers_per_scope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/offers/my_offers/"))
        .and(header("authorization", "Bearer access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            offer_json(7, "countered", "1200.50"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, rest::Style::Actions);
    let offers = client
        .execute(Select(By::<Vec<Offer>, _>::new(Scope::Mine)))
        .await
        .unwrap();

    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].status, Status::Countered);
    assert_eq!(offers[0].price.to_string(), "1200.5INR");
    assert_eq!(offers[0].sender.username.to_string(), "ravi");
    assert!(offers[0].receiver.is_none());
}

#[tokio::test]
async fn posts_actions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/offers/7/accept/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/offers/6/counter/"))
        .and(body_json(json!({"offer_price": "1200"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let svc = refreshed_service(&server, rest::Style::Actions).await;

    let accepted = svc
        .execute(TransitionOffer {
            offer_id: 7_u64.into(),
            transition: Transition::Accept,
        })
        .await
        .unwrap();
    assert_eq!(accepted.status, Status::Accepted);

    let countered = svc
        .execute(CounterOffer {
            offer_id: 6_u64.into(),
            price: "1200".into(),
            by: Role::Owner,
        })
        .await
        .unwrap();
    assert_eq!(countered.status, Status::Countered);
    assert_eq!(countered.price_setter(), Role::Owner);
}

#[tokio::test]
async fn patches_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/offers/7/"))
        .and(body_json(json!({"status": "countered", "offer_price": "1500"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/offers/6/"))
        .and(body_json(json!({"status": "rejected"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, rest::Style::Patch);

    let price = offer::Price::parse("1500", Currency::Inr).unwrap();
    client.execute(change(
        7,
        Transition::Counter {
            price,
            by: Role::Transporter,
        },
    ))
    .await
    .unwrap();
    client.execute(change(6, Transition::Reject)).await.unwrap();
}

#[tokio::test]
async fn unauthorized_leaves_cache_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/offers/7/book/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/offers/7/reject/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Token is invalid"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let svc = refreshed_service(&server, rest::Style::Actions).await;
    let before = svc.offers().snapshot();

    let err = svc
        .execute(TransitionOffer {
            offer_id: 7_u64.into(),
            transition: Transition::Book,
        })
        .await
        .unwrap_err()
        .into_inner();
    assert!(matches!(
        err,
        command::transition_offer::ExecutionError::InvalidTransition(_),
    ));

    let err = svc
        .execute(TransitionOffer {
            offer_id: 7_u64.into(),
            transition: Transition::Reject,
        })
        .await
        .unwrap_err()
        .into_inner();
    let command::transition_offer::ExecutionError::Api(api::Error::Rest(e)) =
        err
    else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(e.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(svc.offers().snapshot(), before);
}

#[tokio::test]
async fn proposes_and_prepends_offer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/offers/"))
        .and(body_json(json!({"package_id": 3, "offer_price": "950"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(offer_json(9, "pending", "950.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let svc = refreshed_service(&server, rest::Style::Actions).await;

    let created = svc
        .execute(CreateOffer {
            package_id: 3_u64.into(),
            price: "950".into(),
        })
        .await
        .unwrap();

    assert_eq!(u64::from(created.id), 9);
    assert_eq!(svc.offers().snapshot()[0], created);
    assert_eq!(svc.offers().snapshot().len(), 3);
}

#[tokio::test]
async fn rejects_malformed_offer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/offers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            offer_json(7, "pending", "-5.00"),
        ])))
        .mount(&server)
        .await;

    let client = client(&server, rest::Style::Actions);
    let err = client
        .execute(Select(By::<Vec<Offer>, _>::new(Scope::All)))
        .await
        .unwrap_err()
        .into_inner();

    assert!(matches!(err, api::Error::Rest(rest::Error::Malformed(_))));
}

#[tokio::test]
async fn pages_marketplace() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/marketplace/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            package_json(1, "Cotton bales", "500.00"),
            package_json(2, "Office chairs", "1500.00"),
            package_json(3, "Machine parts", "2500.00"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let svc = Service::new(
        Config::default(),
        client(&server, rest::Style::Actions),
    );
    let page = svc
        .execute(query::marketplace::Page(list::Selector {
            arguments: list::Arguments::new(1, 6).unwrap(),
            filter: list::Filter {
                search: Some("1500".into()),
            },
            sort: list::Sort::Latest,
        }))
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].title.to_string(), "Office chairs");
}

#[tokio::test]
async fn logs_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .and(body_json(json!({"username": "ravi", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": TRANSPORTER_JWT,
            "refresh": "refresh-token",
            "is_owner": false,
            "is_transporter": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = Service::new(
        Config::default(),
        client(&server, rest::Style::Actions),
    );
    let session = svc
        .execute(CreateUserSession {
            username: Username::new("ravi").unwrap(),
            password: SecretBox::new(Box::new(Password::new("secret").unwrap())),
        })
        .await
        .unwrap();

    assert_eq!(session.role(), Some(Role::Transporter));
    assert_eq!(u64::from(session.claims.user_id), 7);
}

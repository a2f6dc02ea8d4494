use crate::helpers::{spawn_app, spawn_app_with_database, TestApp, TestUser};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use marketplace_order_service::routes::order::schemas::Complaint;
use marketplace_order_service::routes::order::utils::save_complaint;
use marketplace_order_service::schemas::GenericResponse;
use marketplace_order_service::utils::generate_jwt_token_for_user;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use uuid::Uuid;

async fn create_account(app: &TestApp, is_seller: bool, is_shipper: bool) -> TestUser {
    let email: String = SafeEmail().fake();
    app.create_user(&email, false, is_seller, is_shipper).await
}

async fn create_order(app: &TestApp, buyer: &TestUser, seller_id: Option<Uuid>) -> reqwest::Response {
    let body = json!({
        "orderItems": [{
            "name": "Walnut Desk",
            "qty": 2,
            "image": "/images/desk.jpg",
            "price": 30.5,
            "product": Uuid::new_v4()
        }],
        "shippingAddress": {
            "fullName": "Jane Buyer",
            "address": "12 Harbour Road",
            "city": "Wellington",
            "postalCode": "6011",
            "country": "New Zealand"
        },
        "paymentMethod": "PayPal",
        "sellerId": seller_id
    });
    app.send_json(Method::POST, "/order/create", &body, Some(buyer.token.as_str()))
        .await
}

async fn create_order_id(app: &TestApp, buyer: &TestUser, seller_id: Option<Uuid>) -> Uuid {
    let response = create_order(app, buyer, seller_id).await;
    assert_eq!(200, response.status().as_u16());
    let body: GenericResponse<Value> = response.json().await.expect("Failed to parse response");
    body.data
        .as_ref()
        .and_then(|order| order["id"].as_str())
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("Missing order id")
}

async fn fetch_order(app: &TestApp, order_id: Uuid, user: &TestUser) -> Value {
    let response = app
        .get(&format!("/order/{}", order_id), Some(user.token.as_str()))
        .await;
    assert_eq!(200, response.status().as_u16());
    let body: GenericResponse<Value> = response.json().await.expect("Failed to parse response");
    body.data.expect("Order detail returned no data")
}

async fn put(app: &TestApp, path: String, body: Value, user: &TestUser) -> u16 {
    app.send_json(Method::PUT, &path, &body, Some(user.token.as_str()))
        .await
        .status()
        .as_u16()
}

async fn bid(app: &TestApp, order_id: Uuid, price: Value, shipper: &TestUser) -> u16 {
    app.send_json(
        Method::POST,
        &format!("/order/{}/bid", order_id),
        &json!({ "price": price }),
        Some(shipper.token.as_str()),
    )
    .await
    .status()
    .as_u16()
}

#[actix_web::test]
async fn order_routes_require_token() {
    let app = spawn_app().await;
    let order_id = Uuid::new_v4();
    let body = json!({});
    let test_cases = vec![
        (Method::POST, "/order/create".to_string()),
        (Method::GET, "/order/mine".to_string()),
        (Method::GET, format!("/order/{}", order_id)),
        (Method::PUT, format!("/order/{}/pay", order_id)),
        (Method::PUT, format!("/order/{}/deliver", order_id)),
        (Method::POST, format!("/order/{}/bid", order_id)),
        (Method::PUT, format!("/order/{}/select-shipper", order_id)),
        (Method::PUT, format!("/order/{}/shipping-status", order_id)),
        (Method::PUT, format!("/order/{}/complain", order_id)),
    ];
    for (method, path) in test_cases {
        let response = app.send_json(method.clone(), &path, &body, None).await;
        assert_eq!(
            401,
            response.status().as_u16(),
            "{} {} did not require a token.",
            method,
            path
        );
    }
}

#[actix_web::test]
async fn order_routes_reject_foreign_token() {
    let app = spawn_app().await;
    let foreign_secret = SecretString::from("some-other-secret".to_string());
    let token = generate_jwt_token_for_user(Uuid::new_v4(), 1, &foreign_secret)
        .expect("Failed to create token");

    let response = app.get("/order/mine", Some(token.expose_secret())).await;

    assert_eq!(401, response.status().as_u16());
}

#[actix_web::test]
async fn order_lifecycle_allows_a_single_complaint() {
    let app = spawn_app_with_database().await;
    let admin_email = app.admin_email.clone();
    let admin = app.create_user(&admin_email, true, false, false).await;
    let buyer = create_account(&app, false, false).await;
    let order_id = create_order_id(&app, &buyer, None).await;

    let detail = fetch_order(&app, order_id, &buyer).await;
    assert_eq!(detail["order"]["isPaid"], false);
    assert_eq!(detail["view"]["showPayment"], true);

    let complaint = json!({ "clerkWarning": "Late and rude" });
    let complain_path = format!("/order/{}/complain", order_id);
    let deliver_path = format!("/order/{}/deliver", order_id);
    let pay_path = format!("/order/{}/pay", order_id);

    // Neither delivery nor complaint before payment.
    assert_eq!(400, put(&app, complain_path.clone(), complaint.clone(), &buyer).await);
    assert_eq!(400, put(&app, deliver_path.clone(), json!({}), &admin).await);

    let payment = json!({
        "id": "5O190127TN364715T",
        "status": "COMPLETED",
        "update_time": "2024-10-17T10:00:00Z",
        "email_address": "buyer@example.com"
    });
    assert_eq!(403, put(&app, pay_path.clone(), payment.clone(), &admin).await);
    assert_eq!(200, put(&app, pay_path.clone(), payment.clone(), &buyer).await);
    assert_eq!(400, put(&app, pay_path, payment, &buyer).await);

    let detail = fetch_order(&app, order_id, &buyer).await;
    assert_eq!(detail["order"]["isPaid"], true);
    assert_eq!(detail["order"]["paymentResult"]["update_time"], "2024-10-17T10:00:00Z");
    assert_eq!(detail["order"]["paymentResult"]["email_address"], "buyer@example.com");

    let status_path = format!("/order/{}/shipping-status", order_id);
    assert_eq!(400, put(&app, status_path.clone(), json!({ "shippingStatus": "   " }), &admin).await);
    assert_eq!(403, put(&app, status_path.clone(), json!({ "shippingStatus": "Packed" }), &buyer).await);
    assert_eq!(200, put(&app, status_path.clone(), json!({ "shippingStatus": "Left warehouse" }), &admin).await);

    assert_eq!(403, put(&app, deliver_path.clone(), json!({}), &buyer).await);
    assert_eq!(200, put(&app, deliver_path.clone(), json!({}), &admin).await);
    assert_eq!(400, put(&app, deliver_path, json!({}), &admin).await);
    assert_eq!(400, put(&app, status_path, json!({ "shippingStatus": "Returned" }), &admin).await);

    assert_eq!(400, put(&app, complain_path.clone(), json!({ "clerkWarning": " " }), &buyer).await);
    assert_eq!(403, put(&app, complain_path.clone(), complaint.clone(), &admin).await);
    assert_eq!(200, put(&app, complain_path.clone(), complaint.clone(), &buyer).await);
    assert_eq!(400, put(&app, complain_path, json!({ "shipperWarning": "Again" }), &buyer).await);

    let detail = fetch_order(&app, order_id, &buyer).await;
    assert_eq!(detail["order"]["shippingStatus"], "Left warehouse");
    assert_eq!(detail["order"]["complain"]["clerkWarning"], "Late and rude");
    assert_eq!(detail["view"]["complaintReadOnly"], true);
    assert_eq!(detail["view"]["canComplain"], false);

    // The stored complaint is never overwritten, even past the request checks.
    let overwrite = Complaint {
        clerk_warning: "Overwritten".to_string(),
        shipper_warning: String::new(),
        warn_by: buyer.id,
    };
    let saved = save_complaint(&app.db_pool, order_id, &overwrite)
        .await
        .expect("Failed to run complaint update");
    assert!(!saved);
    let detail = fetch_order(&app, order_id, &buyer).await;
    assert_eq!(detail["order"]["complain"]["clerkWarning"], "Late and rude");
}

#[actix_web::test]
async fn selecting_a_pricier_bid_requires_justification() {
    let app = spawn_app_with_database().await;
    let buyer = create_account(&app, false, false).await;
    let seller = create_account(&app, true, false).await;
    let other_seller = create_account(&app, true, false).await;
    let cheap_shipper = create_account(&app, false, true).await;
    let insured_shipper = create_account(&app, false, true).await;
    let order_id = create_order_id(&app, &buyer, Some(seller.id)).await;

    assert_eq!(403, bid(&app, order_id, json!(5), &buyer).await);
    assert_eq!(200, bid(&app, order_id, json!(8), &cheap_shipper).await);
    assert_eq!(200, bid(&app, order_id, json!("12.00"), &insured_shipper).await);

    let select_path = format!("/order/{}/select-shipper", order_id);
    let pricier = json!({ "shipperId": insured_shipper.id, "price": 12 });
    assert_eq!(400, put(&app, select_path.clone(), pricier, &seller).await);

    let justified = json!({
        "shipperId": insured_shipper.id,
        "price": "12",
        "justification": "Insured carrier"
    });
    let other_seller_status = app
        .send_json(Method::PUT, &select_path, &justified, Some(other_seller.token.as_str()))
        .await
        .status()
        .as_u16();
    assert_eq!(403, other_seller_status);
    assert_eq!(200, put(&app, select_path.clone(), justified, &seller).await);

    let cheapest = json!({ "shipperId": cheap_shipper.id, "price": 8 });
    assert_eq!(400, put(&app, select_path, cheapest, &seller).await);
    assert_eq!(400, bid(&app, order_id, json!(7), &cheap_shipper).await);

    let detail = fetch_order(&app, order_id, &seller).await;
    assert_eq!(
        detail["order"]["shipperId"],
        json!(insured_shipper.id.to_string())
    );
    assert_eq!(
        detail["order"]["selectShipperJustification"],
        "Insured carrier"
    );
    assert_eq!(detail["view"]["bidSelectionEnabled"], false);

    // Other shippers lose sight of an assigned order.
    let response = app
        .get(&format!("/order/{}", order_id), Some(cheap_shipper.token.as_str()))
        .await;
    assert_eq!(200, response.status().as_u16());
    let outsider = create_account(&app, false, true).await;
    let response = app
        .get(&format!("/order/{}", order_id), Some(outsider.token.as_str()))
        .await;
    assert_eq!(403, response.status().as_u16());
}

#[actix_web::test]
async fn tied_number_and_string_bids_need_no_justification() {
    let app = spawn_app_with_database().await;
    let buyer = create_account(&app, false, false).await;
    let seller = create_account(&app, true, false).await;
    let first_shipper = create_account(&app, false, true).await;
    let second_shipper = create_account(&app, false, true).await;
    let order_id = create_order_id(&app, &buyer, Some(seller.id)).await;

    assert_eq!(200, bid(&app, order_id, json!(8.1), &first_shipper).await);
    assert_eq!(200, bid(&app, order_id, json!("8.1"), &second_shipper).await);

    let selection = json!({ "shipperId": second_shipper.id, "price": 8.1 });
    assert_eq!(
        200,
        put(
            &app,
            format!("/order/{}/select-shipper", order_id),
            selection,
            &seller
        )
        .await
    );
}

#[actix_web::test]
async fn create_order_rejects_unknown_seller() {
    let app = spawn_app_with_database().await;
    let buyer = create_account(&app, false, false).await;
    let not_a_seller = create_account(&app, false, false).await;

    let response = create_order(&app, &buyer, Some(Uuid::new_v4())).await;
    assert_eq!(400, response.status().as_u16());
    let response = create_order(&app, &buyer, Some(not_a_seller.id)).await;
    assert_eq!(400, response.status().as_u16());

    let response = app.get("/order/mine", Some(buyer.token.as_str())).await;
    assert_eq!(200, response.status().as_u16());
    let body: GenericResponse<Vec<Value>> = response.json().await.expect("Failed to parse response");
    assert_eq!(body.data.map(|orders| orders.len()), Some(0));
}

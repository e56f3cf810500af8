//! Unit tests for the package context.


use crate::customer::domain::CustomerId;
use crate::package::domain::{Courier, ReceivePackage, Recipient, TrackingNumber};

/// Builds a receive request for a recipient with a phone number.
fn receive_request(name: &str, tracking: &str, phone: Option<&str>) -> ReceivePackage {
    ReceivePackage {
        courier: Courier::new("Purolator").expect("valid courier"),
        tracking: TrackingNumber::new(tracking).expect("valid tracking number"),
        customer_id: None,
        recipient: Recipient::new(name, phone.map(str::to_owned), "P5A 2T1")
            .expect("valid recipient"),
        label_image: None,
        created_by: Some("front-desk".to_owned()),
    }
}

/// Builds a receive request linked to `customer_id`.
fn receive_request_for(customer_id: CustomerId, name: &str, tracking: &str) -> ReceivePackage {
    ReceivePackage {
        customer_id: Some(customer_id),
        ..receive_request(name, tracking, None)
    }
}

pub use super::shipping_token::Entity as ShippingToken;

pub mod builder;
pub mod constant;
pub mod error;
pub mod fixtures;
pub mod setup;

pub use builder::TestBuilder;
pub use error::TestError;
pub use setup::{MockCarrierEndpoints, TestSetup};

pub mod prelude {
    pub use crate::{
        constant::*, fixtures::carrier::mock_token_response, test_setup_with_shipping_tables,
        test_setup_with_tables, TestBuilder, TestError, TestSetup,
    };
}

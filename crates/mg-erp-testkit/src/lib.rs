//! # MG ERP Testkit
//!
//! Testing utilities for MG ERP.
//!
//! - **Fixtures**: on-disk stores in temporary directories, empty, seeded, or
//!   without a schema
//! - **Generators**: proptest strategies for products, SKUs, origins, and
//!   quantities
//!
//! ```rust
//! use mg_erp_testkit::TestFixture;
//!
//! let fixture = TestFixture::seeded();
//! assert_eq!(fixture.count("products"), 2);
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::TestFixture;

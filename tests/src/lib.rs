//! # CEP Lookup Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Address fixtures, scripted HTTP server
//! └── integration/
//!     ├── flows.rs      # Full pipeline against scripted providers
//!     └── http_providers.rs  # Correios + ViaCEP adapters over real sockets
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cep-tests
//!
//! # By category
//! cargo test -p cep-tests integration::flows::
//! cargo test -p cep-tests integration::http_providers::
//!
//! # Benchmarks
//! cargo bench -p cep-tests
//! ```

pub mod fixtures;

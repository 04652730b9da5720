pub mod forensic_scraper;
pub mod http_client;
pub mod regulator_scraper;

pub use forensic_scraper::*;
pub use http_client::*;
pub use regulator_scraper::*;

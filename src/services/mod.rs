pub mod accesstrade;
pub mod analyst;
pub mod openai_client;
pub mod web_search;

pub use accesstrade::*;
pub use analyst::*;
pub use openai_client::*;
pub use web_search::*;

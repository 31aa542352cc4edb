// Quote acquisition
pub mod quote_source;

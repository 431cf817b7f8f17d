//! Client for the poeprices.info item price prediction API.
//!
//! [`client::PricePredictionClient`] is the entry point: it strips markup from
//! item text, sends it base64-encoded together with a league, retries while
//! the service answers 403 and validates the shape of the reply.

pub mod client;
pub mod commands;
pub mod config;
pub mod http;
pub mod item;
pub mod prediction;
pub mod runtime;

pub use client::{PredictionError, PricePredictionClient, PricePredictor};
pub use prediction::{ClientResult, PredictionResponse, QueryParameters, has_all_keys};

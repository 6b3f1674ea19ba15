#![deny(
    clippy::mutable_key_type,
    clippy::map_entry,
    clippy::boxed_local,
    clippy::let_unit_value,
    clippy::redundant_allocation,
    clippy::bool_comparison,
    clippy::bind_instead_of_map,
    clippy::vec_box,
    clippy::while_let_loop,
    clippy::useless_asref,
    clippy::repeat_once,
    clippy::deref_addrof,
    clippy::suspicious_map,
    clippy::single_char_pattern,
    clippy::for_kv_map,
    clippy::let_and_return,
    clippy::iter_nth,
    clippy::iter_cloned_collect,
    clippy::match_result_ok,
    clippy::cmp_owned,
    clippy::op_ref
)]

#[macro_use]
extern crate serde;

pub mod date_keywords;
pub mod dialog;
pub mod geo_path;
pub mod models;
pub mod ojp_client;
pub mod ojp_xml;
pub mod place_lookup;
pub mod render;
pub mod time_normalize;
pub mod trip_parse;
pub mod trip_rank;

/// Default OJP 1.0 endpoint of the Swiss open transport data platform.
pub const DEFAULT_OJP_ENDPOINT: &str = "https://api.opentransportdata.swiss/ojp2020";

/// Shown wherever a response document omits an optional text field.
pub const MISSING_FIELD_PLACEHOLDER: &str = "–";

#![allow(dead_code)]

pub mod fixtures;
pub mod http_fixture;

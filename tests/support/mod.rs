#![allow(dead_code)]

pub mod games;

#![allow(unused_imports)]

#[macro_use]
extern crate log;

use wasm_bindgen::prelude::*;

mod pages;

pub fn main() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

    yew::start_app::<pages::home::Home>();

    Ok(())
}

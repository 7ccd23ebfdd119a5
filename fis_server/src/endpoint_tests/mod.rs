mod helpers;
mod mocks;

mod orders;
mod shop;
mod webhook;

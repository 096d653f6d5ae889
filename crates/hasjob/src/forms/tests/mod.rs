mod action;
mod common;

//! Suburban timetable bot server.
//!
//! Backend of a chat bot that answers "when is the next train from here to
//! there?": finds stations and settlements by name, labels routes for
//! buttons, and renders timetables as messages that fit the chat transport.

pub mod alert;
pub mod cache;
pub mod compact;
pub mod directory;
pub mod domain;
pub mod matcher;
pub mod rasp;
pub mod render;
pub mod settings;
pub mod texts;
pub mod web;

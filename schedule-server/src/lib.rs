//! Route departure schedule server.
//!
//! Turns a route's weekly departure schedule into what a departure view
//! renders: a timetable for fixed-time schedules, or a day-grouped list of
//! headway windows for flexible ones, split into weekday and weekend halves.

pub mod aggregate;
pub mod config;
pub mod departures;
pub mod domain;
pub mod labels;
pub mod web;

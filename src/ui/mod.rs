/// UI building blocks for the gallery screen

pub mod grid;

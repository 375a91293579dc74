pub mod clock;
pub mod food;
pub mod game;
pub mod input;
pub mod particles;
pub mod rendering;
pub mod session;
pub mod snake;
pub mod storage;
pub mod ui;

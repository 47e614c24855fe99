pub mod animation;
pub mod asset;
pub mod config;
pub mod consts;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod machine;
pub mod presentation;
pub mod resize;
pub mod tween;

pub mod decode;
pub mod dump;
pub mod encode;
pub mod input;
pub mod inspect;

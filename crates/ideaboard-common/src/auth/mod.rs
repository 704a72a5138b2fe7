//! Identity token verification

mod jwt;

pub use jwt::{Claims, JwtService, TokenType};

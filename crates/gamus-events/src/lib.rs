//! Decodificación de los mensajes que publica el productor aguas arriba.
//!
//! El esquema de cable lo define el productor; [`wire`] lo refleja con tipos
//! prost y [`codec`] lo traduce al [`Event`] del dominio.
//!
//! [`Event`]: gamus_core::domain::Event

pub mod codec;
pub mod wire;

pub use codec::{DecodeError, decode, encode};

//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Projections between arbitrary coordinate reference systems using the
//! pure-Rust proj4rs engine.

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

mod proj4d;
mod registry;

pub use crate::proj4d::{Proj4d, Proj4dProjection};
pub use crate::registry::{
    register_definition, registered_definition, unregister_definition, ProjDefinition,
};

pub(crate) use crate::cli::{self, Config};
pub(crate) use crate::constants::*;
pub(crate) use crate::kernel;
pub(crate) use crate::prelude::*;
pub(crate) use crate::velocity_set::Q;
pub(crate) use std::sync::Arc;

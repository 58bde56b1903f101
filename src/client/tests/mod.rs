use super::test_helpers::*;
use super::*;
use crate::config::RateBudgetConfig;
use crate::error::{AuthError, DecodeError, Error, RestrictionReason, TransportError};
use crate::types::Replies;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

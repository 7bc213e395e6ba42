//! User endpoint: account metadata for the token's owner.

use metafold_core::user::{License, Quota, Usage};

use crate::client::MetafoldClient;
use crate::error::ClientResult;
use crate::transport::Transport;

pub struct User<'a, T> {
    client: &'a MetafoldClient<T>,
}

impl<'a, T: Transport> User<'a, T> {
    pub(crate) fn new(client: &'a MetafoldClient<T>) -> Self {
        Self { client }
    }

    /// License information, with issue and expiry dates normalized.
    pub async fn license(&self) -> ClientResult<License> {
        self.client.get("/user/license", Default::default()).await?.json()
    }

    /// Remaining quota.
    pub async fn quota(&self) -> ClientResult<Quota> {
        self.client.get("/user/quota", Default::default()).await?.json()
    }

    /// Lifetime usage counts.
    pub async fn usage(&self) -> ClientResult<Usage> {
        self.client.get("/user/usage", Default::default()).await?.json()
    }
}

// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use config::{ContractBackend, StoryConfig};
use tokio::sync::RwLock;
use tracing::info;

use crate::chain::memory::DEFAULT_WALLET_ADDRESS;
use crate::chain::{
    ChainError, ContractReader, ContractWriter, HiroReadClient, InMemoryContract, NoWallet, Wallet,
    WalletBridge,
};
use crate::poller::{PollerHandle, Refresher, StoryFetcher, StoryStore};
use crate::routes::RouteRegistry;

/// The three contract collaborators the service talks to.
#[derive(Clone)]
pub struct Backend {
    pub reader: Arc<dyn ContractReader>,
    pub writer: Arc<dyn ContractWriter>,
    pub wallet: Arc<dyn Wallet>,
}

impl Backend {
    /// One in-process contract serving reads, writes and the wallet.
    pub fn in_memory(contract: Arc<InMemoryContract>) -> Self {
        Self {
            reader: contract.clone(),
            writer: contract.clone(),
            wallet: contract,
        }
    }

    pub fn from_config(config: &StoryConfig) -> Result<Self, ChainError> {
        match config.contract.backend {
            ContractBackend::Memory => {
                let address = config
                    .wallet
                    .address
                    .clone()
                    .unwrap_or_else(|| DEFAULT_WALLET_ADDRESS.to_string());
                info!(%address, "Using in-memory story contract");
                Ok(Self::in_memory(Arc::new(InMemoryContract::new(address))))
            }
            ContractBackend::Hiro => {
                let timeout = config.poll.request_timeout();
                let reader = Arc::new(HiroReadClient::new(&config.contract, timeout)?);
                info!(
                    api_url = %config.contract.api_url,
                    contract = %config.contract.contract_id(),
                    network = %config.contract.network,
                    "Using node API"
                );

                match &config.wallet.bridge_url {
                    Some(url) => {
                        let bridge = Arc::new(WalletBridge::new(url.clone(), timeout)?);
                        Ok(Self {
                            reader,
                            writer: bridge.clone(),
                            wallet: bridge,
                        })
                    }
                    None => Ok(Self {
                        reader,
                        writer: Arc::new(NoWallet),
                        wallet: Arc::new(NoWallet),
                    }),
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StoryConfig>,
    pub store: StoryStore,
    pub fetcher: Arc<StoryFetcher>,
    pub refresher: Refresher,
    pub writer: Arc<dyn ContractWriter>,
    pub wallet: Arc<dyn Wallet>,
    /// Primary address of the connected wallet, if any.
    pub session: Arc<RwLock<Option<String>>>,
    pub route_registry: RouteRegistry,
}

impl AppState {
    pub fn new(config: StoryConfig, backend: Backend) -> Self {
        let store = StoryStore::new();
        let fetcher = Arc::new(StoryFetcher::from_config(backend.reader, &config));
        let refresher = Refresher::new(fetcher.clone(), store.clone());

        Self {
            config: Arc::new(config),
            store,
            fetcher,
            refresher,
            writer: backend.writer,
            wallet: backend.wallet,
            session: Arc::new(RwLock::new(None)),
            route_registry: RouteRegistry::new(),
        }
    }

    /// Start the background poller for this state's store. Shutting it down
    /// also stops refreshes triggered through [`AppState::refresher`].
    pub fn spawn_poller(&self) -> PollerHandle {
        self.refresher.spawn_poller(self.config.poll.interval())
    }

    pub async fn connected_address(&self) -> Option<String> {
        self.session.read().await.clone()
    }
}

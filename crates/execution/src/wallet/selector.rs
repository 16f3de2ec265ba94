//! Connection state machine.

use super::{Connector, ProviderEvent, ProviderSession, WalletProvider, select_best_connector};
use crate::error::WalletError;
use omniyield_data::BalanceSource;
use omniyield_domain::entities::{NativeBalance, WalletConnection};
use omniyield_domain::registry::ChainRegistry;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Symbol used when the active chain is not in the registry.
const DEFAULT_NATIVE_SYMBOL: &str = "ZETA";

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// Transient. A failed or cancelled attempt passes through it within one
    /// state update and settles in `Disconnected`, so it only shows up in the
    /// transition log. The reason is kept in [`ConnectorSelector::last_error`].
    Error,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Result of [`ConnectorSelector::connect_best`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectOutcome {
    Connected(WalletConnection),
    /// No connector is present in the host environment.
    NoWallet,
}

struct SelectorState {
    status: ConnectionState,
    connection: WalletConnection,
    connector: Option<Connector>,
    last_error: Option<String>,
    /// Bumped on every connect and teardown so stale listeners are ignored.
    session: u64,
    listener: Option<JoinHandle<()>>,
}

impl SelectorState {
    fn transition(&mut self, next: ConnectionState) {
        info!(from = %self.status, to = %next, "Wallet state transition");
        self.status = next;
    }

    /// Ends a failed attempt, passing through `Error` to `Disconnected`.
    fn fail_attempt(&mut self, reason: String) {
        self.transition(ConnectionState::Error);
        self.last_error = Some(reason);
        self.transition(ConnectionState::Disconnected);
        self.connector = None;
        self.connection = WalletConnection::default();
    }

    /// Clears the connection and returns the listener handle of the ended session.
    fn teardown(&mut self, reason: &str) -> Option<JoinHandle<()>> {
        self.transition(ConnectionState::Disconnected);
        info!(reason = reason, "Wallet disconnected");
        self.connection = WalletConnection::default();
        self.connector = None;
        self.session += 1;
        self.listener.take()
    }
}

struct Shared {
    provider: Arc<dyn WalletProvider>,
    balances: Option<Arc<dyn BalanceSource>>,
    registry: ChainRegistry,
    state: RwLock<SelectorState>,
}

impl Shared {
    /// Applies a provider event to `session`. Returns false once the session is over.
    async fn apply_event(&self, session: u64, event: ProviderEvent) -> bool {
        let refresh = {
            let mut state = self.state.write().await;
            if state.session != session || state.status != ConnectionState::Connected {
                debug!(event = ?event, "Ignoring event for an inactive session");
                return false;
            }

            match event {
                ProviderEvent::AccountsChanged(accounts) => match accounts.into_iter().next() {
                    Some(address) => {
                        if state.connection.address.as_deref() == Some(address.as_str()) {
                            false
                        } else {
                            info!(address = %address, "Account changed");
                            state.connection = state.connection.with_address(address);
                            true
                        }
                    }
                    None => {
                        // Dropped rather than aborted: this runs on the listener itself.
                        drop(state.teardown("wallet exposed no accounts"));
                        return false;
                    }
                },
                ProviderEvent::ChainChanged(chain_id) => {
                    info!(chain_id = %chain_id, "Active chain changed");
                    state.connection = state.connection.with_chain(chain_id);
                    true
                }
                ProviderEvent::Disconnected => {
                    drop(state.teardown("provider ended the session"));
                    return false;
                }
            }
        };

        if refresh {
            self.refresh_balance().await;
        }
        true
    }

    async fn refresh_balance(&self) -> Option<NativeBalance> {
        let balances = self.balances.as_ref()?;
        let (address, chain_id, session) = {
            let state = self.state.read().await;
            if state.status != ConnectionState::Connected {
                return None;
            }
            (
                state.connection.address.clone()?,
                state.connection.active_chain_id.clone(),
                state.session,
            )
        };

        let record = match balances.native_balance(&address, chain_id.as_ref()).await {
            Ok(record) => record,
            Err(e) => {
                warn!(address = %address, error = %e, "Balance refresh failed, keeping previous value");
                return None;
            }
        };

        let symbol = chain_id
            .as_ref()
            .and_then(|id| self.registry.native_symbol(id))
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_NATIVE_SYMBOL);
        let Some(balance) = record.into_native(symbol) else {
            warn!(address = %address, "Backend returned an invalid balance");
            return None;
        };

        let mut state = self.state.write().await;
        let unchanged = state.session == session
            && state.connection.address.as_deref() == Some(address.as_str())
            && state.connection.active_chain_id == chain_id;
        if !unchanged {
            debug!(address = %address, "Discarding balance for a superseded account or chain");
            return None;
        }

        state.connection = state.connection.with_balance(balance.clone());
        debug!(amount = balance.amount, symbol = %balance.symbol, "Balance updated");
        Some(balance)
    }
}

fn spawn_listener(
    shared: Arc<Shared>,
    session: u64,
    mut events: mpsc::Receiver<ProviderEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if !shared.apply_event(session, event).await {
                return;
            }
        }
        debug!(session = session, "Provider event stream closed");
    })
}

/// Rolls back an attempt whose `connect` future was dropped while `Connecting`.
///
/// Does nothing once the attempt has settled or a later session has started.
struct ConnectAttempt {
    shared: Arc<Shared>,
    session: u64,
}

impl ConnectAttempt {
    fn abandon(state: &mut SelectorState, session: u64) {
        if state.session != session || state.status != ConnectionState::Connecting {
            return;
        }
        warn!(session = session, "Wallet connection attempt cancelled");
        state.fail_attempt("connection attempt cancelled".to_string());
    }
}

impl Drop for ConnectAttempt {
    fn drop(&mut self) {
        let session = self.session;
        if let Ok(mut state) = self.shared.state.try_write() {
            Self::abandon(&mut state, session);
            return;
        }
        // The lock is busy; finish the rollback once it is released.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let shared = Arc::clone(&self.shared);
            handle.spawn(async move {
                let mut state = shared.state.write().await;
                ConnectAttempt::abandon(&mut state, session);
            });
        }
    }
}

/// Owns the wallet connection and keeps it in step with provider events.
///
/// The [`WalletConnection`] is replaced as a whole on every change. Provider
/// events are consumed from the session's channel by a background task that
/// lives as long as the session.
pub struct ConnectorSelector {
    shared: Arc<Shared>,
}

impl ConnectorSelector {
    /// Creates a selector without balance lookups.
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self::build(provider, None, ChainRegistry::builtin())
    }

    /// Creates a selector that refreshes the native balance after connecting
    /// and after every account or chain change.
    pub fn with_balances(
        provider: Arc<dyn WalletProvider>,
        balances: Arc<dyn BalanceSource>,
        registry: ChainRegistry,
    ) -> Self {
        Self::build(provider, Some(balances), registry)
    }

    fn build(
        provider: Arc<dyn WalletProvider>,
        balances: Option<Arc<dyn BalanceSource>>,
        registry: ChainRegistry,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                provider,
                balances,
                registry,
                state: RwLock::new(SelectorState {
                    status: ConnectionState::Disconnected,
                    connection: WalletConnection::default(),
                    connector: None,
                    last_error: None,
                    session: 0,
                    listener: None,
                }),
            }),
        }
    }

    pub async fn state(&self) -> ConnectionState {
        self.shared.state.read().await.status
    }

    pub async fn connection(&self) -> WalletConnection {
        self.shared.state.read().await.connection.clone()
    }

    /// Reason of the last failed connection attempt.
    pub async fn last_error(&self) -> Option<String> {
        self.shared.state.read().await.last_error.clone()
    }

    pub async fn active_connector(&self) -> Option<Connector> {
        self.shared.state.read().await.connector.clone()
    }

    pub async fn list_available_connectors(&self) -> Vec<Connector> {
        self.shared.provider.available_connectors().await
    }

    /// Connects through the highest-priority available connector.
    ///
    /// # Errors
    /// Propagates the failure of [`ConnectorSelector::connect`].
    pub async fn connect_best(&self) -> Result<ConnectOutcome, WalletError> {
        let available = self.list_available_connectors().await;
        let Some(connector) = select_best_connector(&available) else {
            info!("No wallet connector available");
            self.shared.state.write().await.last_error = Some("no wallet available".to_string());
            return Ok(ConnectOutcome::NoWallet);
        };

        debug!(connector = %connector, candidates = available.len(), "Selected connector");
        let connection = self.connect(connector).await?;
        Ok(ConnectOutcome::Connected(connection))
    }

    /// Opens a session through `connector`, replacing any current session.
    ///
    /// On failure the selector passes through `Error` back to `Disconnected`
    /// and keeps the reason in [`ConnectorSelector::last_error`]. Dropping the
    /// returned future before it resolves does the same.
    ///
    /// # Errors
    /// Returns [`WalletError::ConnectionInProgress`] while another attempt is
    /// running, or the provider's rejection.
    pub async fn connect(&self, connector: &Connector) -> Result<WalletConnection, WalletError> {
        if self.state().await == ConnectionState::Connected {
            self.disconnect().await?;
        }

        let _attempt = {
            let mut state = self.shared.state.write().await;
            if state.status == ConnectionState::Connecting {
                return Err(WalletError::ConnectionInProgress);
            }
            state.transition(ConnectionState::Connecting);
            state.connector = Some(connector.clone());
            state.last_error = None;
            ConnectAttempt {
                shared: Arc::clone(&self.shared),
                session: state.session,
            }
        };

        let session = match self.shared.provider.connect(connector).await {
            Ok(session) => session,
            Err(e) => return Err(self.fail(e).await),
        };
        let ProviderSession {
            accounts,
            chain_id,
            events,
        } = session;
        let Some(address) = accounts.into_iter().next() else {
            let e = WalletError::ConnectionRejected("wallet exposed no accounts".to_string());
            return Err(self.fail(e).await);
        };

        {
            let mut state = self.shared.state.write().await;
            state.session += 1;
            state.connection = WalletConnection::connected(address, chain_id);
            state.transition(ConnectionState::Connected);
            let listener = spawn_listener(Arc::clone(&self.shared), state.session, events);
            state.listener = Some(listener);
            info!(
                connector = %connector,
                address = ?state.connection.address,
                chain_id = ?state.connection.active_chain_id,
                "Wallet connected"
            );
        }

        self.shared.refresh_balance().await;
        Ok(self.connection().await)
    }

    async fn fail(&self, error: WalletError) -> WalletError {
        let mut state = self.shared.state.write().await;
        warn!(error = %error, "Wallet connection failed");
        state.fail_attempt(error.to_string());
        error
    }

    /// Ends the session and clears the connection immediately.
    ///
    /// # Errors
    /// Returns [`WalletError::NotConnected`] when no session is open.
    pub async fn disconnect(&self) -> Result<(), WalletError> {
        let listener = {
            let mut state = self.shared.state.write().await;
            if state.status != ConnectionState::Connected {
                return Err(WalletError::NotConnected);
            }
            state.teardown("disconnect requested")
        };
        if let Some(listener) = listener {
            listener.abort();
        }

        if let Err(e) = self.shared.provider.disconnect().await {
            warn!(error = %e, "Provider disconnect failed");
        }
        Ok(())
    }

    /// Applies a provider event to the current session.
    pub async fn handle_event(&self, event: ProviderEvent) {
        let session = self.shared.state.read().await.session;
        self.shared.apply_event(session, event).await;
    }

    /// Re-reads the native balance of the connected account. A failed read
    /// keeps the previous balance and returns `None`.
    pub async fn refresh_balance(&self) -> Option<NativeBalance> {
        self.shared.refresh_balance().await
    }
}

impl Drop for ConnectorSelector {
    fn drop(&mut self) {
        if let Ok(mut state) = self.shared.state.try_write() {
            if let Some(listener) = state.listener.take() {
                listener.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use omniyield_data::SourceError;
    use omniyield_data::records::BalanceRecord;
    use omniyield_domain::value_objects::ChainId;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    const ALICE: &str = "0x00000000000000000000000000000000000000a1";
    const BOB: &str = "0x00000000000000000000000000000000000000b2";

    struct MockProvider {
        connectors: Vec<Connector>,
        rejection: Option<String>,
        accounts: Vec<String>,
        chain_id: Option<ChainId>,
        sender: Mutex<Option<mpsc::Sender<ProviderEvent>>>,
        connected_with: Mutex<Option<String>>,
        disconnects: AtomicUsize,
        /// Makes the next `connect` hang.
        stall: AtomicBool,
    }

    impl MockProvider {
        fn new(names: &[&str]) -> Self {
            Self {
                connectors: names.iter().map(|n| Connector::new(n.to_lowercase(), *n)).collect(),
                rejection: None,
                accounts: vec![ALICE.to_string()],
                chain_id: Some(ChainId::from(7001u64)),
                sender: Mutex::new(None),
                connected_with: Mutex::new(None),
                disconnects: AtomicUsize::new(0),
                stall: AtomicBool::new(false),
            }
        }

        fn rejecting(reason: &str) -> Self {
            Self {
                rejection: Some(reason.to_string()),
                ..Self::new(&["MetaMask"])
            }
        }

        fn sender(&self) -> mpsc::Sender<ProviderEvent> {
            self.sender.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl WalletProvider for MockProvider {
        async fn available_connectors(&self) -> Vec<Connector> {
            self.connectors.clone()
        }

        async fn connect(&self, connector: &Connector) -> Result<ProviderSession, WalletError> {
            if self.stall.swap(false, Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            if let Some(reason) = &self.rejection {
                return Err(WalletError::ConnectionRejected(reason.clone()));
            }
            *self.connected_with.lock().unwrap() = Some(connector.name.clone());
            let (tx, rx) = mpsc::channel(16);
            *self.sender.lock().unwrap() = Some(tx);
            Ok(ProviderSession {
                accounts: self.accounts.clone(),
                chain_id: self.chain_id.clone(),
                events: rx,
            })
        }

        async fn disconnect(&self) -> Result<(), WalletError> {
            self.disconnects.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockBalances {
        failing: AtomicBool,
    }

    #[async_trait]
    impl BalanceSource for MockBalances {
        async fn native_balance(
            &self,
            address: &str,
            _chain_id: Option<&ChainId>,
        ) -> Result<BalanceRecord, SourceError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(SourceError::Unavailable("balance endpoint down".to_string()));
            }
            let balance = if address == ALICE { 12.5 } else { 3.0 };
            Ok(BalanceRecord {
                address: Some(address.to_string()),
                balance,
                symbol: None,
                balance_usd: None,
            })
        }
    }

    fn selector_with_balances(provider: Arc<MockProvider>, balances: Arc<MockBalances>) -> ConnectorSelector {
        ConnectorSelector::with_balances(provider, balances, ChainRegistry::builtin())
    }

    async fn wait_until(
        selector: &ConnectorSelector,
        check: impl Fn(ConnectionState, &WalletConnection) -> bool,
    ) -> bool {
        for _ in 0..200 {
            if check(selector.state().await, &selector.connection().await) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_connect_populates_connection_and_balance() {
        let provider = Arc::new(MockProvider::new(&["MetaMask"]));
        let selector = selector_with_balances(provider, Arc::new(MockBalances::default()));

        let outcome = selector.connect_best().await.unwrap();
        let ConnectOutcome::Connected(connection) = outcome else {
            panic!("expected a connection");
        };

        assert_eq!(selector.state().await, ConnectionState::Connected);
        assert!(connection.is_connected);
        assert_eq!(connection.address.as_deref(), Some(ALICE));
        assert_eq!(connection.active_chain_id, Some(ChainId::from(7001u64)));
        let balance = connection.native_balance.unwrap();
        assert_eq!(balance.amount, 12.5);
        assert_eq!(balance.symbol, "ZETA");
    }

    #[tokio::test]
    async fn test_connect_best_uses_priority() {
        let provider = Arc::new(MockProvider::new(&["Injected", "WalletConnect"]));
        let selector = ConnectorSelector::new(provider.clone());

        selector.connect_best().await.unwrap();

        assert_eq!(
            provider.connected_with.lock().unwrap().as_deref(),
            Some("WalletConnect")
        );
        assert_eq!(selector.active_connector().await.unwrap().name, "WalletConnect");
    }

    #[tokio::test]
    async fn test_no_wallet_is_an_outcome() {
        let selector = ConnectorSelector::new(Arc::new(MockProvider::new(&[])));

        let outcome = selector.connect_best().await.unwrap();

        assert_eq!(outcome, ConnectOutcome::NoWallet);
        assert_eq!(selector.state().await, ConnectionState::Disconnected);
        assert!(selector.last_error().await.is_some());
    }

    #[tokio::test]
    async fn test_rejection_returns_to_disconnected() {
        let selector = ConnectorSelector::new(Arc::new(MockProvider::rejecting("user cancelled")));

        let result = selector.connect_best().await;

        assert!(matches!(result, Err(WalletError::ConnectionRejected(_))));
        assert_eq!(selector.state().await, ConnectionState::Disconnected);
        assert!(selector.last_error().await.unwrap().contains("user cancelled"));
        assert!(!selector.connection().await.is_connected);
    }

    #[tokio::test]
    async fn test_empty_account_list_is_rejected() {
        let provider = MockProvider {
            accounts: Vec::new(),
            ..MockProvider::new(&["MetaMask"])
        };
        let selector = ConnectorSelector::new(Arc::new(provider));

        assert!(selector.connect_best().await.is_err());
        assert_eq!(selector.state().await, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_disconnect_clears_connection() {
        let provider = Arc::new(MockProvider::new(&["MetaMask"]));
        let selector = ConnectorSelector::new(provider.clone());
        selector.connect_best().await.unwrap();

        selector.disconnect().await.unwrap();

        assert_eq!(selector.state().await, ConnectionState::Disconnected);
        assert_eq!(selector.connection().await, WalletConnection::default());
        assert_eq!(provider.disconnects.load(Ordering::SeqCst), 1);
        assert!(matches!(
            selector.disconnect().await,
            Err(WalletError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_provider_events_update_connection() {
        let provider = Arc::new(MockProvider::new(&["MetaMask"]));
        let selector = selector_with_balances(provider.clone(), Arc::new(MockBalances::default()));
        selector.connect_best().await.unwrap();
        let events = provider.sender();

        events
            .send(ProviderEvent::ChainChanged(ChainId::from(137u64)))
            .await
            .unwrap();
        assert!(
            wait_until(&selector, |_, c| {
                c.active_chain_id == Some(ChainId::from(137u64))
                    && c.native_balance.as_ref().is_some_and(|b| b.symbol == "MATIC")
            })
            .await
        );
        assert_eq!(selector.state().await, ConnectionState::Connected);

        events
            .send(ProviderEvent::AccountsChanged(vec![BOB.to_string()]))
            .await
            .unwrap();
        assert!(
            wait_until(&selector, |_, c| {
                c.address.as_deref() == Some(BOB)
                    && c.native_balance.as_ref().is_some_and(|b| b.amount == 3.0)
            })
            .await
        );

        events
            .send(ProviderEvent::AccountsChanged(Vec::new()))
            .await
            .unwrap();
        assert!(
            wait_until(&selector, |state, c| {
                state == ConnectionState::Disconnected && !c.is_connected
            })
            .await
        );
    }

    #[tokio::test]
    async fn test_provider_disconnect_event() {
        let provider = Arc::new(MockProvider::new(&["MetaMask"]));
        let selector = ConnectorSelector::new(provider.clone());
        selector.connect_best().await.unwrap();

        selector.handle_event(ProviderEvent::Disconnected).await;

        assert_eq!(selector.state().await, ConnectionState::Disconnected);
        assert!(selector.connection().await.address.is_none());
    }

    #[tokio::test]
    async fn test_balance_failure_keeps_previous_value() {
        let provider = Arc::new(MockProvider::new(&["MetaMask"]));
        let balances = Arc::new(MockBalances::default());
        let selector = selector_with_balances(provider, balances.clone());
        selector.connect_best().await.unwrap();

        balances.failing.store(true, Ordering::SeqCst);
        assert!(selector.refresh_balance().await.is_none());

        let connection = selector.connection().await;
        assert_eq!(selector.state().await, ConnectionState::Connected);
        assert_eq!(connection.native_balance.unwrap().amount, 12.5);
    }

    #[tokio::test]
    async fn test_balance_failure_on_connect_is_not_fatal() {
        let provider = Arc::new(MockProvider::new(&["MetaMask"]));
        let balances = Arc::new(MockBalances::default());
        balances.failing.store(true, Ordering::SeqCst);
        let selector = selector_with_balances(provider, balances);

        let outcome = selector.connect_best().await.unwrap();

        assert!(matches!(outcome, ConnectOutcome::Connected(c) if c.native_balance.is_none()));
        assert_eq!(selector.state().await, ConnectionState::Connected);
    }

    fn metamask() -> Connector {
        Connector::new("metamask", "MetaMask")
    }

    #[tokio::test]
    async fn test_cancelled_connect_returns_to_disconnected() {
        let provider = Arc::new(MockProvider::new(&["MetaMask"]));
        provider.stall.store(true, Ordering::SeqCst);
        let selector = ConnectorSelector::new(provider.clone());

        let attempt =
            tokio::time::timeout(Duration::from_millis(20), selector.connect(&metamask())).await;
        assert!(attempt.is_err());

        assert!(
            wait_until(&selector, |state, c| {
                state == ConnectionState::Disconnected && !c.is_connected
            })
            .await
        );
        assert!(selector.last_error().await.unwrap().contains("cancelled"));
        assert!(selector.active_connector().await.is_none());

        let connection = selector.connect(&metamask()).await.unwrap();
        assert!(connection.is_connected);
        assert_eq!(selector.state().await, ConnectionState::Connected);
        assert!(selector.last_error().await.is_none());
    }

    #[tokio::test]
    async fn test_connect_during_connecting_is_rejected() {
        let provider = Arc::new(MockProvider::new(&["MetaMask"]));
        provider.stall.store(true, Ordering::SeqCst);
        let selector = ConnectorSelector::new(provider.clone());

        let first_wallet = metamask();
        let (first, second) = tokio::join!(
            tokio::time::timeout(Duration::from_millis(100), selector.connect(&first_wallet)),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                selector.connect(&metamask()).await
            }
        );

        assert!(matches!(second, Err(WalletError::ConnectionInProgress)));
        assert!(first.is_err());
        assert!(
            wait_until(&selector, |state, _| state == ConnectionState::Disconnected).await
        );
    }

    #[tokio::test]
    async fn test_reconnect_replaces_session() {
        let provider = Arc::new(MockProvider::new(&["MetaMask"]));
        let selector = ConnectorSelector::new(provider.clone());
        selector.connect_best().await.unwrap();
        let old_events = provider.sender();

        selector.connect(&metamask()).await.unwrap();

        assert_eq!(provider.disconnects.load(Ordering::SeqCst), 1);
        assert_eq!(selector.state().await, ConnectionState::Connected);

        // The old listener is aborted, which drops its receiver.
        for _ in 0..200 {
            if old_events.is_closed() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(old_events.is_closed());

        let _ = old_events
            .send(ProviderEvent::ChainChanged(ChainId::from(137u64)))
            .await;
        let _ = old_events.send(ProviderEvent::Disconnected).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(selector.state().await, ConnectionState::Connected);
        assert_eq!(
            selector.connection().await.active_chain_id,
            Some(ChainId::from(7001u64))
        );

        provider
            .sender()
            .send(ProviderEvent::ChainChanged(ChainId::from(56u64)))
            .await
            .unwrap();
        assert!(
            wait_until(&selector, |_, c| c.active_chain_id == Some(ChainId::from(56u64))).await
        );
    }

    #[tokio::test]
    async fn test_error_state_is_not_observable_after_failure() {
        let selector = ConnectorSelector::new(Arc::new(MockProvider::rejecting("denied")));

        let _ = selector.connect(&metamask()).await;

        assert_ne!(selector.state().await, ConnectionState::Error);
        assert_eq!(selector.state().await, ConnectionState::Disconnected);
    }
}

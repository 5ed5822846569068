//! Operations context for dependency injection

use cyget_config::Config;
use cyget_errors::Error;
use cyget_events::{EventEmitter, EventSender};
use cyget_net::{NetClient, NetConfig};
use tokio_util::sync::CancellationToken;

/// Operations context providing access to all run-wide components
pub struct OpsCtx {
    /// Network client
    pub net: NetClient,
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// Effective configuration
    pub config: Config,
    /// Interrupt requested by the user: finish in-flight work, start nothing new
    pub cancel: CancellationToken,
    /// Forced interrupt: abandon in-flight work as well
    pub abort: CancellationToken,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for [`OpsCtx`]
#[derive(Default)]
pub struct OpsContextBuilder {
    net: Option<NetClient>,
    tx: Option<EventSender>,
    config: Option<Config>,
    cancel: Option<CancellationToken>,
    abort: Option<CancellationToken>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set network client; built from the config's network section otherwise
    #[must_use]
    pub fn with_net(mut self, net: NetClient) -> Self {
        self.net = Some(net);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Share a cancellation token with the caller
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Share a forced-abort token with the caller
    #[must_use]
    pub fn with_abort(mut self, abort: CancellationToken) -> Self {
        self.abort = Some(abort);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if the event sender is missing or the network
    /// client cannot be created.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let tx = self
            .tx
            .ok_or_else(|| Error::internal("missing component: event_sender"))?;

        let config = self.config.unwrap_or_default();

        let net = match self.net {
            Some(net) => net,
            None => NetClient::new(NetConfig::from(&config.network))?,
        };

        Ok(OpsCtx {
            net,
            tx,
            config,
            cancel: self.cancel.unwrap_or_default(),
            abort: self.abort.unwrap_or_default(),
        })
    }
}

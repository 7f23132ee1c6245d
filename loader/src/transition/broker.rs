//! Delivery of run-mode transitions to named handlers.
//!
//! The host owns one [`Broker`] for the lifetime of the process and publishes
//! every run-mode transition to it. Handlers attach by name through
//! [`Broker::subscribe`] and receive a [`Subscription`], a FIFO of the
//! transitions published after that point.
//!
//! A handler name can only be subscribed once at a time. Registering the same
//! handler twice would make it react twice to a single transition, so the
//! second attempt is refused with [`SubscribeError::AlreadySubscribed`].
//! Dropping a [`Subscription`] releases its name on the next publish.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut broker = Broker::new();
//! let subscription = broker.subscribe("auto-load")?;
//!
//! broker.publish(RunModeTransition::ExitingEditMode);
//! broker.publish(RunModeTransition::EnteredRunMode);
//!
//! for transition in subscription.drain() {
//!     println!("{:?}", transition);
//! }
//! ```

use crossbeam::channel::{Receiver, Sender, TryIter, unbounded};
use log::{debug, trace};

use crate::{error::SubscribeError, transition::RunModeTransition};

/// Fan-out of run-mode transitions to subscribed handlers.
pub struct Broker {
    /// Subscribers in subscription order.
    subscribers: Vec<(String, Sender<RunModeTransition>)>,
}

impl Broker {
    /// Creates a broker with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Attaches the handler called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SubscribeError::AlreadySubscribed`] if a live subscription
    /// with the same name exists.
    pub fn subscribe(&mut self, name: &str) -> Result<Subscription, SubscribeError> {
        if self.is_subscribed(name) {
            return Err(SubscribeError::AlreadySubscribed(name.to_string()));
        }
        let (sender, receiver) = unbounded();
        self.subscribers.push((name.to_string(), sender));
        debug!("Subscribed {} to run-mode transitions", name);
        Ok(Subscription {
            name: name.to_string(),
            receiver,
        })
    }

    /// Returns `true` if a live subscription named `name` exists.
    pub fn is_subscribed(&self, name: &str) -> bool {
        self.subscribers.iter().any(|(n, _)| n == name)
    }

    /// Delivers `transition` to every subscriber and returns how many received
    /// it. Subscribers whose [`Subscription`] has been dropped are removed.
    pub fn publish(&mut self, transition: RunModeTransition) -> usize {
        trace!("Publishing {:?}", transition);
        self.subscribers.retain(|(name, sender)| {
            let delivered = sender.send(transition).is_ok();
            if !delivered {
                debug!("Dropping closed subscription {}", name);
            }
            delivered
        });
        self.subscribers.len()
    }

    /// Number of live subscribers as of the last publish.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl Default for Broker {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of a handler's transitions.
pub struct Subscription {
    name: String,
    receiver: Receiver<RunModeTransition>,
}

impl Subscription {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Takes the oldest pending transition, if any.
    pub fn try_next(&self) -> Option<RunModeTransition> {
        self.receiver.try_recv().ok()
    }

    /// Iterates over the pending transitions in publish order without blocking.
    pub fn drain(&self) -> TryIter<'_, RunModeTransition> {
        self.receiver.try_iter()
    }

    /// Number of transitions waiting to be handled.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

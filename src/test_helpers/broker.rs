//! Scriptable in-memory broker interfaces that record call counts.
//!
//! The default behaviour is to accept everything; tests queue failures,
//! alternate outcomes, or hangs for individual calls. Counters make the
//! connect/disconnect pairing observable.

use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    broker::{BrokerAdmin, BrokerError, BrokerProducer, TopicCreation},
    models::TopicSpec,
};

/// An in-memory `BrokerAdmin` that records lifecycle calls and replays
/// scripted create-topic outcomes.
#[derive(Default)]
pub struct RecordingAdmin {
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    creates: AtomicUsize,
    connect_failures: Mutex<VecDeque<BrokerError>>,
    create_outcomes: Mutex<VecDeque<Result<TopicCreation, BrokerError>>>,
    hanging_creates: AtomicUsize,
}

impl RecordingAdmin {
    /// Queues an outcome for the next create-topic call. Unscripted calls
    /// succeed with `TopicCreation::Created`.
    pub fn push_create_outcome(&self, outcome: Result<TopicCreation, BrokerError>) {
        self.create_outcomes.lock().unwrap().push_back(outcome);
    }

    /// Makes the next connect call fail with the given error.
    pub fn fail_next_connect(&self, error: BrokerError) {
        self.connect_failures.lock().unwrap().push_back(error);
    }

    /// Makes the next create-topic call block forever, so a caller-side
    /// timeout fires.
    pub fn hang_next_create(&self) {
        self.hanging_creates.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of connect calls observed, including failed ones.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Number of disconnect calls observed.
    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    /// Number of create-topic calls observed.
    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrokerAdmin for RecordingAdmin {
    async fn connect(&self) -> Result<(), BrokerError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        match self.connect_failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn create_topic(&self, _spec: &TopicSpec) -> Result<TopicCreation, BrokerError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self
            .hanging_creates
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            std::future::pending::<()>().await;
        }
        let scripted = self.create_outcomes.lock().unwrap().pop_front();
        scripted.unwrap_or(Ok(TopicCreation::Created))
    }

    async fn disconnect(&self) -> Result<(), BrokerError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// An in-memory `BrokerProducer` that records lifecycle calls and captures
/// published messages.
#[derive(Default)]
pub struct RecordingProducer {
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    sends: AtomicUsize,
    connect_failures: Mutex<VecDeque<BrokerError>>,
    send_outcomes: Mutex<VecDeque<Result<(), BrokerError>>>,
    hanging_sends: AtomicUsize,
    messages: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingProducer {
    /// Queues an outcome for the next send call. Unscripted sends succeed.
    pub fn push_send_outcome(&self, outcome: Result<(), BrokerError>) {
        self.send_outcomes.lock().unwrap().push_back(outcome);
    }

    /// Makes the next connect call fail with the given error.
    pub fn fail_next_connect(&self, error: BrokerError) {
        self.connect_failures.lock().unwrap().push_back(error);
    }

    /// Makes the next send call block forever, so a caller-side timeout
    /// fires.
    pub fn hang_next_send(&self) {
        self.hanging_sends.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of connect calls observed, including failed ones.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Number of disconnect calls observed.
    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    /// Number of send calls observed, including failed ones.
    pub fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    /// The successfully delivered messages, as `(topic, payload)` pairs.
    pub fn messages(&self) -> Vec<(String, Vec<u8>)> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrokerProducer for RecordingProducer {
    async fn connect(&self) -> Result<(), BrokerError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        match self.connect_failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn send(&self, topic: &str, payload: &[u8]) -> Result<(), BrokerError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        if self
            .hanging_sends
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            std::future::pending::<()>().await;
        }
        let scripted = self.send_outcomes.lock().unwrap().pop_front();
        match scripted {
            Some(Err(error)) => Err(error),
            _ => {
                self.messages.lock().unwrap().push((topic.to_string(), payload.to_vec()));
                Ok(())
            }
        }
    }

    async fn disconnect(&self) -> Result<(), BrokerError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

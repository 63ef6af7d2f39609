#![allow(dead_code)]

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use medstock::{Medicine, MedicineTable, NewMedicine};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TableError(pub String);

pub type ListReply = Result<Vec<Medicine>, TableError>;

enum Reply<T> {
    Ready(T),
    Gated(oneshot::Receiver<T>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> T {
        match self {
            Reply::Ready(reply) => reply,
            Reply::Gated(rx) => rx.await.expect("gate dropped before replying"),
        }
    }
}

/// Table double answering list calls from a queue of scripted replies.
///
/// Inserts succeed with a fresh uuid unless a failure was queued.
#[derive(Default)]
pub struct ScriptedTable {
    lists: Mutex<VecDeque<Reply<ListReply>>>,
    insert_failures: Mutex<VecDeque<TableError>>,
    inserted: Mutex<Vec<NewMedicine>>,
}

impl ScriptedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_list(&self, reply: ListReply) {
        self.lists.lock().unwrap().push_back(Reply::Ready(reply));
    }

    /// Queues a list reply that is only delivered once the returned sender fires.
    pub fn gate_list(&self) -> oneshot::Sender<ListReply> {
        let (tx, rx) = oneshot::channel();
        self.lists.lock().unwrap().push_back(Reply::Gated(rx));
        tx
    }

    pub fn fail_next_insert(&self, message: &str) {
        self.insert_failures
            .lock()
            .unwrap()
            .push_back(TableError(message.to_string()));
    }

    pub fn inserted(&self) -> Vec<NewMedicine> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl MedicineTable for ScriptedTable {
    type Error = TableError;

    async fn list_medicines_ordered_by_name(&self) -> Result<Vec<Medicine>, Self::Error> {
        let reply = self
            .lists
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected list call");
        reply.resolve().await
    }

    async fn insert_medicine(&self, draft: &NewMedicine) -> Result<Medicine, Self::Error> {
        if let Some(failure) = self.insert_failures.lock().unwrap().pop_front() {
            return Err(failure);
        }
        self.inserted.lock().unwrap().push(draft.clone());
        Ok(Medicine {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name.clone(),
            location: draft.location.clone(),
            is_in_stock: draft.is_in_stock,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

pub fn medicine(id: &str, name: &str, location: &str, is_in_stock: bool) -> Medicine {
    Medicine {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        is_in_stock,
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

use std::sync::Arc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use crate::domain::OperatorId;

/// One async lock per operator. Holding it means "this operator's event is being handled";
/// different operators never wait on each other.
#[derive(Default)]
pub struct OperatorGates {
    gates: DashMap<OperatorId, Arc<Mutex<()>>>,
}

impl OperatorGates {
    pub fn gate(&self, operator: OperatorId) -> Arc<Mutex<()>> {
        self.gates.entry(operator).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_gates_are_per_operator() {
        let gates = OperatorGates::default();
        let first = gates.gate(1);
        let _held = first.lock().await;

        assert!(gates.gate(1).try_lock().is_err());
        assert!(gates.gate(2).try_lock().is_ok());
    }
}

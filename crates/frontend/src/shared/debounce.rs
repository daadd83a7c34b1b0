//! Debounce через счётчик поколений.
//!
//! Каждый ввод увеличивает поколение и запускает таймер; по срабатыванию
//! таймер выполняет действие, только если его поколение всё ещё последнее.
//! Так не нужно хранить и отменять JS-таймеры.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceGate {
    generation: u64,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Новый ввод: возвращает тикет, который нужно проверить по истечении задержки
    pub fn bump(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Тикет актуален, если после него не было ввода
    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }
}

/// Возвращает функцию, которая вызывает `action` не раньше чем через `delay_ms`
/// после последнего вызова.
pub fn debounced<T>(delay_ms: u32, action: Callback<T>) -> impl Fn(T) + Copy + 'static
where
    T: Send + Sync + 'static,
{
    let gate = StoredValue::new(DebounceGate::new());
    move |value: T| {
        let ticket = gate
            .try_update_value(|g| g.bump())
            .unwrap_or_default();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if gate.try_with_value(|g| g.is_current(ticket)).unwrap_or(false) {
                action.run(value);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_fires() {
        let mut gate = DebounceGate::new();
        let first = gate.bump();
        let second = gate.bump();
        let third = gate.bump();

        assert!(!gate.is_current(first));
        assert!(!gate.is_current(second));
        assert!(gate.is_current(third));
    }

    #[test]
    fn test_separate_bursts() {
        let mut gate = DebounceGate::new();
        let a = gate.bump();
        assert!(gate.is_current(a));
        let b = gate.bump();
        assert!(gate.is_current(b));
        assert_ne!(a, b);
    }
}

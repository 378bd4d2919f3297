//! Forward-only status flow validation
//!
//! 订单与配送共用同一条规则：状态只能沿固定序列向前移动，
//! CANCELLED 为吸收终止态，进入后不再接受任何转换。
//!
//! The flow itself never touches the database — engines read the current
//! status, ask the flow to validate the requested target, and only then
//! persist. A rejected transition therefore never has side effects.

use shared::AppError;
use shared::models::{DeliveryStatus, OrderStatus};
use std::fmt::Display;

/// How far forward a single transition may jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any strictly-forward jump is allowed (e.g. CREATED -> DELIVERING).
    /// Matches the historical behavior where an operator may fast-forward.
    #[default]
    AnyForward,
    /// Only the immediate successor is allowed
    NextOnly,
}

/// A fixed forward sequence of statuses with an absorbing terminal state
pub struct StatusFlow<T: 'static> {
    sequence: &'static [T],
    terminal: T,
}

/// Order fulfilment flow. CANCELLED is modeled but has no entry path.
pub const ORDER_FLOW: StatusFlow<OrderStatus> = StatusFlow::new(
    &[
        OrderStatus::Created,
        OrderStatus::Paid,
        OrderStatus::Preparing,
        OrderStatus::Delivering,
        OrderStatus::Completed,
    ],
    OrderStatus::Cancelled,
);

/// Delivery flow. CANCELLED is modeled but has no entry path.
pub const DELIVERY_FLOW: StatusFlow<DeliveryStatus> = StatusFlow::new(
    &[
        DeliveryStatus::Assigned,
        DeliveryStatus::PickedUp,
        DeliveryStatus::Delivered,
    ],
    DeliveryStatus::Cancelled,
);

impl<T: Copy + Eq + Display> StatusFlow<T> {
    pub const fn new(sequence: &'static [T], terminal: T) -> Self {
        Self { sequence, terminal }
    }

    fn position(&self, status: T) -> Option<usize> {
        self.sequence.iter().position(|s| *s == status)
    }

    /// Validate a proposed transition and return the target status.
    ///
    /// Fails when the current status is terminal, when either side is not a
    /// member of the forward sequence (CANCELLED is never a member), or when
    /// the target does not lie forward of the current position under the
    /// given policy. Self-transitions are never allowed.
    pub fn advance(&self, current: T, next: T, policy: TransitionPolicy) -> Result<T, AppError> {
        if current == self.terminal {
            return Err(AppError::invalid_transition(current, next));
        }
        let (Some(from), Some(to)) = (self.position(current), self.position(next)) else {
            return Err(AppError::invalid_transition(current, next));
        };
        let allowed = match policy {
            TransitionPolicy::AnyForward => to > from,
            TransitionPolicy::NextOnly => to == from + 1,
        };
        if allowed {
            Ok(next)
        } else {
            Err(AppError::invalid_transition(current, next))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    fn assert_rejected<T: Copy + Eq + Display + std::fmt::Debug>(
        flow: &StatusFlow<T>,
        current: T,
        next: T,
        policy: TransitionPolicy,
    ) {
        let err = flow.advance(current, next, policy).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    }

    #[test]
    fn test_order_forward_steps_allowed() {
        use OrderStatus::*;
        let steps = [(Created, Paid), (Paid, Preparing), (Preparing, Delivering), (Delivering, Completed)];
        for (from, to) in steps {
            assert_eq!(
                ORDER_FLOW.advance(from, to, TransitionPolicy::AnyForward).unwrap(),
                to
            );
            assert_eq!(
                ORDER_FLOW.advance(from, to, TransitionPolicy::NextOnly).unwrap(),
                to
            );
        }
    }

    #[test]
    fn test_backward_and_self_transitions_rejected() {
        use OrderStatus::*;
        let sequence = [Created, Paid, Preparing, Delivering, Completed];
        for (i, &from) in sequence.iter().enumerate() {
            // self and everything at or before the current position
            for &to in &sequence[..=i] {
                assert_rejected(&ORDER_FLOW, from, to, TransitionPolicy::AnyForward);
                assert_rejected(&ORDER_FLOW, from, to, TransitionPolicy::NextOnly);
            }
        }
    }

    #[test]
    fn test_skip_ahead_depends_on_policy() {
        use OrderStatus::*;
        // CREATED -> DELIVERING jumps two steps
        assert_eq!(
            ORDER_FLOW
                .advance(Created, Delivering, TransitionPolicy::AnyForward)
                .unwrap(),
            Delivering
        );
        assert_rejected(&ORDER_FLOW, Created, Delivering, TransitionPolicy::NextOnly);
    }

    #[test]
    fn test_terminal_states_absorb() {
        use OrderStatus::*;
        for to in [Created, Paid, Preparing, Delivering, Completed, Cancelled] {
            assert_rejected(&ORDER_FLOW, Cancelled, to, TransitionPolicy::AnyForward);
            assert_rejected(&ORDER_FLOW, Completed, to, TransitionPolicy::AnyForward);
        }
    }

    #[test]
    fn test_cancelled_is_not_a_forward_target() {
        use OrderStatus::*;
        for from in [Created, Paid, Preparing, Delivering] {
            assert_rejected(&ORDER_FLOW, from, Cancelled, TransitionPolicy::AnyForward);
            assert_rejected(&ORDER_FLOW, from, Cancelled, TransitionPolicy::NextOnly);
        }
    }

    #[test]
    fn test_delivery_flow() {
        use DeliveryStatus::*;
        assert_eq!(
            DELIVERY_FLOW
                .advance(Assigned, PickedUp, TransitionPolicy::AnyForward)
                .unwrap(),
            PickedUp
        );
        assert_eq!(
            DELIVERY_FLOW
                .advance(PickedUp, Delivered, TransitionPolicy::AnyForward)
                .unwrap(),
            Delivered
        );
        // skip straight to DELIVERED is forward under AnyForward
        assert_eq!(
            DELIVERY_FLOW
                .advance(Assigned, Delivered, TransitionPolicy::AnyForward)
                .unwrap(),
            Delivered
        );
        assert_rejected(&DELIVERY_FLOW, Assigned, Delivered, TransitionPolicy::NextOnly);
        assert_rejected(&DELIVERY_FLOW, Delivered, PickedUp, TransitionPolicy::AnyForward);
        assert_rejected(&DELIVERY_FLOW, Cancelled, PickedUp, TransitionPolicy::AnyForward);
    }
}

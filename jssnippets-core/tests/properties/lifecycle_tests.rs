//! Property-based tests for the init/destroy lifecycle
//!
//! Whatever the source returns, `destroy` must leave the host without any
//! command or completer owned by the service.

use std::sync::Arc;

use jssnippets_core::{
    Completer, CompletionCallback, CompletionContext, CompletionRegistry, FetchResponse,
    MemoryHost, ServiceState,
};
use proptest::prelude::*;

use super::arb_snippets;
use crate::fixtures::{service_with, source_for};

struct Bystander;

impl Completer for Bystander {
    fn get_completions(&self, _context: &CompletionContext, _prefix: &str, callback: CompletionCallback) {
        callback(Vec::new());
    }
}

fn arb_response() -> impl Strategy<Value = FetchResponse> {
    prop_oneof![
        4 => arb_snippets().prop_map(|s| FetchResponse::ok(source_for(&s))),
        1 => Just(FetchResponse::ok(r#"{"a":1}"#)),
        1 => Just(FetchResponse::ok("[{")),
        1 => prop_oneof![Just(403u16), Just(404), Just(500)].prop_map(FetchResponse::status),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After init then destroy, none of the service's registrations remain
    /// and unrelated completers survive.
    #[test]
    fn destroy_reverses_init(response in arb_response()) {
        let host = MemoryHost::new();
        let bystander: Arc<dyn Completer> = Arc::new(Bystander);
        host.set_completers(vec![Arc::clone(&bystander)]);

        let mut service = service_with(&host, response);
        let state = runtime().block_on(service.init("https://cdn.example.com/plugin"));
        prop_assert!(matches!(state, ServiceState::Ready | ServiceState::Degraded));

        service.destroy();
        prop_assert_eq!(service.state(), ServiceState::TornDown);
        prop_assert!(host.command_names().is_empty());

        let remaining = host.completers();
        prop_assert_eq!(remaining.len(), 1);
        prop_assert!(Arc::ptr_eq(&remaining[0], &bystander));
    }

    /// A failed load registers nothing and always shows exactly one toast.
    #[test]
    fn degraded_registers_nothing(response in arb_response()) {
        let host = MemoryHost::new();
        let mut service = service_with(&host, response);
        let state = runtime().block_on(service.init("/"));

        if state == ServiceState::Degraded {
            prop_assert!(host.command_names().is_empty());
            prop_assert_eq!(host.completer_count(), 0);
            prop_assert_eq!(host.toasts().len(), 1);
        } else {
            prop_assert!(host.toasts().is_empty());
            prop_assert_eq!(host.command_names().len(), service.command_names().len());
        }
    }
}

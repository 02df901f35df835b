/// Tracks which generation still needs a job and which one is rendering.
///
/// Commands only record the newest generation; several commands between two
/// dispatches therefore coalesce into one job for the latest state.
#[derive(Debug, Default)]
pub struct DispatchState {
    pending_generation: Option<u64>,
    coalesced_requests: u32,
    in_flight_generation: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchAction {
    /// A job for `generation` was scheduled, covering `requests` commands.
    Submitted { generation: u64, requests: u32 },
    NothingToDo,
}

impl DispatchState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `generation` needs rendering. Returns `true` when an
    /// undispatched request was superseded.
    pub fn request(&mut self, generation: u64) -> bool {
        let coalesced = self.pending_generation.replace(generation).is_some();
        self.coalesced_requests += 1;
        coalesced
    }

    /// Hands the pending generation to `submit`. On failure the request stays
    /// pending so a later dispatch can retry it.
    pub fn submit_pending<E>(
        &mut self,
        submit: impl FnOnce(u64) -> Result<(), E>,
    ) -> Result<DispatchAction, E> {
        let Some(generation) = self.pending_generation else {
            return Ok(DispatchAction::NothingToDo);
        };

        submit(generation)?;

        let requests = self.coalesced_requests;
        self.pending_generation = None;
        self.coalesced_requests = 0;
        self.in_flight_generation = Some(generation);

        Ok(DispatchAction::Submitted {
            generation,
            requests,
        })
    }

    pub fn observe_completion(&mut self, generation: u64) {
        if self.in_flight_generation.is_some_and(|in_flight| generation >= in_flight) {
            self.in_flight_generation = None;
        }
    }

    /// Forgets the in-flight job without touching the pending request.
    pub fn abandon_in_flight(&mut self) {
        self.in_flight_generation = None;
    }

    pub fn reset(&mut self) {
        self.pending_generation = None;
        self.coalesced_requests = 0;
        self.in_flight_generation = None;
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_generation.is_some()
    }

    #[must_use]
    pub fn pending_generation(&self) -> Option<u64> {
        self.pending_generation
    }

    #[must_use]
    pub fn in_flight_generation(&self) -> Option<u64> {
        self.in_flight_generation
    }
}

#[cfg(test)]
mod tests {
    use super::{DispatchAction, DispatchState};

    fn ok(_: u64) -> Result<(), ()> {
        Ok(())
    }

    #[test]
    fn nothing_to_do_without_requests() {
        let mut dispatch = DispatchState::new();

        assert_eq!(dispatch.submit_pending(ok), Ok(DispatchAction::NothingToDo));
        assert_eq!(dispatch.in_flight_generation(), None);
    }

    #[test]
    fn submits_the_requested_generation() {
        let mut dispatch = DispatchState::new();
        assert!(!dispatch.request(1));

        let action = dispatch.submit_pending(ok);

        assert_eq!(
            action,
            Ok(DispatchAction::Submitted {
                generation: 1,
                requests: 1
            })
        );
        assert_eq!(dispatch.in_flight_generation(), Some(1));
        assert!(!dispatch.has_pending());
    }

    #[test]
    fn multiple_requests_coalesce_into_the_newest() {
        let mut dispatch = DispatchState::new();
        dispatch.request(1);
        assert!(dispatch.request(2));
        assert!(dispatch.request(3));

        let mut submitted = Vec::new();
        let action = dispatch.submit_pending(|generation| {
            submitted.push(generation);
            Ok::<(), ()>(())
        });

        assert_eq!(submitted, vec![3]);
        assert_eq!(
            action,
            Ok(DispatchAction::Submitted {
                generation: 3,
                requests: 3
            })
        );
    }

    #[test]
    fn failed_submit_keeps_request_pending() {
        let mut dispatch = DispatchState::new();
        dispatch.request(4);

        let action = dispatch.submit_pending(|_| Err("no"));

        assert_eq!(action, Err("no"));
        assert_eq!(dispatch.pending_generation(), Some(4));
        assert_eq!(dispatch.in_flight_generation(), None);
    }

    #[test]
    fn completion_mismatch_keeps_in_flight_generation() {
        let mut dispatch = DispatchState::new();
        dispatch.request(5);
        let _ = dispatch.submit_pending(ok);

        dispatch.observe_completion(4);
        assert_eq!(dispatch.in_flight_generation(), Some(5));

        dispatch.observe_completion(5);
        assert_eq!(dispatch.in_flight_generation(), None);
    }

    #[test]
    fn new_request_while_in_flight_waits_for_dispatch() {
        let mut dispatch = DispatchState::new();
        dispatch.request(1);
        let _ = dispatch.submit_pending(ok);

        dispatch.request(2);

        assert_eq!(dispatch.in_flight_generation(), Some(1));
        assert_eq!(dispatch.pending_generation(), Some(2));
    }

    #[test]
    fn reset_clears_pending_and_in_flight_state() {
        let mut dispatch = DispatchState::new();
        dispatch.request(1);
        let _ = dispatch.submit_pending(ok);
        dispatch.request(2);

        dispatch.reset();

        assert!(!dispatch.has_pending());
        assert_eq!(dispatch.in_flight_generation(), None);
    }
}

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::controllers::interactive::events::render_event::RenderEvent;

pub trait PresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}

/// Queues events on a channel so the presentation layer can drain them at
/// its own cadence.
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    sender: Sender<RenderEvent>,
}

impl ChannelPresenter {
    #[must_use]
    pub fn new() -> (Self, Receiver<RenderEvent>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }
}

impl PresenterPort for ChannelPresenter {
    fn present(&self, event: RenderEvent) {
        // A dropped receiver just means nobody is watching anymore.
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_arrive_in_order() {
        let (presenter, events) = ChannelPresenter::new();

        presenter.present(RenderEvent::Cancelled { generation: 1 });
        presenter.present(RenderEvent::Cancelled { generation: 2 });

        let received: Vec<u64> = events.try_iter().map(|e| e.generation()).collect();
        assert_eq!(received, vec![1, 2]);
    }

    #[test]
    fn presenting_without_a_receiver_is_harmless() {
        let (presenter, events) = ChannelPresenter::new();
        drop(events);

        presenter.present(RenderEvent::Cancelled { generation: 1 });
    }
}

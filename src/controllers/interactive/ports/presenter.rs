use crate::controllers::interactive::events::render::RenderEvent;

pub trait FlamePresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}

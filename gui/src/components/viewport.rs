// Hosting viewport: forwards size changes to the render surface
use super::chart::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    attached: bool,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, attached: false }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Sends the current size to a freshly created surface.
    pub fn attach<R: RenderSurface>(&mut self, surface: &mut R) -> anyhow::Result<()> {
        self.attached = false;
        self.resize(self.width, self.height, surface)?;
        Ok(())
    }

    /// Records a new hosting size and forwards it. Returns `false` when the
    /// size did not change and nothing was forwarded.
    pub fn resize<R: RenderSurface>(&mut self, width: u32, height: u32, surface: &mut R) -> anyhow::Result<bool> {
        if self.attached && (width, height) == (self.width, self.height) {
            return Ok(false);
        }
        surface.resize(width, height)?;
        self.width = width;
        self.height = height;
        self.attached = true;
        Ok(true)
    }
}

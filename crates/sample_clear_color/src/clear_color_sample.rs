use crate::CLEAR_COLOR;
use sample_host::d3d12::GraphicsCore;
use sample_host::input::Size2D;
use sample_host::AppHost;
use sample_host::SampleApp;
use tracing::info;

/// Clears the back buffer every frame and presents it.
pub struct ClearColorSample {
    graphics: GraphicsCore,
}

impl SampleApp for ClearColorSample {
    const TITLE: &'static str = "01 ClearColor";

    fn init(host: &dyn AppHost) -> eyre::Result<Self> {
        let graphics = GraphicsCore::new(host, CLEAR_COLOR)?;
        info!(feature_level = %graphics.feature_level(), "ClearColor initialized");
        Ok(Self { graphics })
    }

    fn render(&mut self) -> eyre::Result<()> {
        self.graphics.begin_frame(None)?;
        self.graphics.end_frame()?;
        Ok(())
    }

    fn on_resize(&mut self, new_size: Size2D) -> eyre::Result<()> {
        self.graphics.resize(new_size)?;
        Ok(())
    }
}

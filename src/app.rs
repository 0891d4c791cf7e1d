use tracing::info;

use crate::data::dataset::Dataset;
use crate::data::loader::DatasetLoader;
use crate::data::source::DataSource;
use crate::error::Result;
use crate::filter::FilterController;
use crate::plot::chart::{ChartBuilder, ChartSpec};
use crate::plot::render::Renderer;
use crate::selection::{SelectionEvent, SelectionProvider};

/// Load once, then re-filter, rebuild and re-render on every selection change.
pub struct AppController<R> {
    loader: DatasetLoader,
    builder: ChartBuilder,
    renderer: R,
    dataset: Dataset,
    filter: FilterController,
}

impl<R: Renderer> AppController<R> {
    /// Load `source` and render every method. Load errors are returned before anything is drawn.
    pub fn start(source: &dyn DataSource, loader: DatasetLoader, builder: ChartBuilder, renderer: R) -> Result<Self> {
        let dataset = loader.load_from(source)?;
        let filter = FilterController::new(&dataset);
        info!("Methods: {}", filter.available_methods().join(", "));

        let mut app = Self { loader, builder, renderer, dataset, filter };
        app.refresh()?;
        Ok(app)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> &FilterController {
        &self.filter
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Chart for the current selection.
    pub fn chart(&self) -> ChartSpec {
        self.builder.build(&self.filter.filtered(&self.dataset))
    }

    /// Rebuild and hand the chart to the renderer.
    pub fn refresh(&mut self) -> Result<()> {
        let spec = self.chart();
        info!("Rendering {} points for {} selected methods", spec.data.len(), self.filter.selection().len());
        self.renderer.render(&spec)
    }

    pub fn on_selection_change<I, S>(&mut self, chosen: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.set_selection(chosen);
        self.refresh()
    }

    /// Re-run the whole load. On failure the previous dataset and selection stay in place.
    pub fn reload(&mut self, source: &dyn DataSource) -> Result<()> {
        let dataset = self.loader.load_from(source)?;
        self.filter.reset(&dataset);
        self.dataset = dataset;
        self.refresh()
    }

    pub fn handle(&mut self, event: SelectionEvent, source: &dyn DataSource) -> Result<()> {
        match event {
            SelectionEvent::Select(chosen) => self.on_selection_change(chosen),
            SelectionEvent::SelectAll => {
                self.filter.select_all();
                self.refresh()
            }
            SelectionEvent::Reload => self.reload(source),
        }
    }

    /// Drive the app until the provider runs out of events.
    pub fn run(&mut self, provider: &mut dyn SelectionProvider, source: &dyn DataSource) -> Result<()> {
        while let Some(event) = provider.next_event()? {
            self.handle(event, source)?;
        }
        Ok(())
    }
}

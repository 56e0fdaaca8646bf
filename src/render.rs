use async_trait::async_trait;

use crate::data_types::ChartConfig;
use crate::error::RenderError;

/// Opaque chart-drawing backend. Nothing it returns flows back into the
/// model; callers log failures and carry on.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    async fn setup_chart(&self, config: &ChartConfig) -> Result<(), RenderError>;

    /// Replaces every dataset on the chart.
    async fn load_chart_data(&self, config: &ChartConfig) -> Result<(), RenderError>;

    /// Appends the given datasets' points to the chart.
    async fn update_chart_data(&self, config: &ChartConfig) -> Result<(), RenderError>;
}

/// Which engine call a cycle ends with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderCommand {
    Setup,
    Load,
    Update,
}

impl RenderCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RenderCommand::Setup => "setupChart",
            RenderCommand::Load => "loadChartData",
            RenderCommand::Update => "updateChartData",
        }
    }

    pub async fn send<R: RenderEngine + ?Sized>(
        &self,
        engine: &R,
        config: &ChartConfig,
    ) -> Result<(), RenderError> {
        match self {
            RenderCommand::Setup => engine.setup_chart(config).await,
            RenderCommand::Load => engine.load_chart_data(config).await,
            RenderCommand::Update => engine.update_chart_data(config).await,
        }
    }
}

use crate::domain::model::{ReadingResult, SignalParameters};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn birth_date(&self) -> &str;
    fn partner_date(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    /// "radians" or "degrees".
    fn angle_convention(&self) -> &str;
    /// "self-plus-buffer" or "fixed".
    fn sizing_policy(&self) -> &str;
    fn spiral_buffer(&self) -> usize;
    fn point_count(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn derive(&self) -> Result<Vec<SignalParameters>>;
    async fn compute(&self, params: Vec<SignalParameters>) -> Result<ReadingResult>;
    async fn export(&self, result: ReadingResult) -> Result<String>;
}

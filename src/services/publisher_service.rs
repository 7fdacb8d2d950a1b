//! 出版商服务

use crate::{
    error::AppError,
    models::publisher::{CreatePublisherRequest, PublisherResponse},
    repository::PublisherRepository,
};

pub struct PublisherService {
    publishers: PublisherRepository,
}

impl PublisherService {
    pub fn new(publishers: PublisherRepository) -> Self {
        Self { publishers }
    }

    /// 创建出版商，名称重复时返回 Conflict
    pub async fn create(&self, req: &CreatePublisherRequest) -> Result<PublisherResponse, AppError> {
        let publisher = self.publishers.create(&req.name, &req.city).await?;

        tracing::info!(publisher_id = publisher.id, name = %publisher.name, "Publisher created");

        Ok(publisher.into())
    }
}

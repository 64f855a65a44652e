use crate::backends::{TranslateClient, VisionClient};

#[derive(Clone)]
pub(crate) struct ServerState {
    pub(crate) vision: VisionClient,
    pub(crate) translate: TranslateClient,
}

use axum::extract::FromRef;
use fhub_backend::BackendClient;
use fhub_domain::config::GatewayConfig;
use fhub_domain::registry::{FeatureSlice, InitializedSlice};
use fxhash::FxHashMap;
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[fhub_derive::fhub_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State missing feature slice{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Immutable after start-up; shared by every request task.
#[derive(Debug)]
pub struct ApiStateInner {
    pub config: GatewayConfig,
    pub backend: BackendClient,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner.slices.get(&TypeId::of::<T>()).and_then(InitializedSlice::downcast::<T>)
    }

    /// # Errors
    /// The slice was never registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }

    pub fn slice_ids(&self) -> impl Iterator<Item = &TypeId> {
        self.inner.slices.keys()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for GatewayConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for BackendClient {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.backend.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<GatewayConfig>,
    backend: Option<BackendClient>,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn backend(mut self, backend: BackendClient) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.insert(slice.id, slice);
        self
    }

    #[must_use]
    pub fn register_slices<I>(mut self, slices: I) -> Self
    where
        I: IntoIterator<Item = InitializedSlice>,
    {
        self.slices.extend(slices.into_iter().map(|slice| (slice.id, slice)));
        self
    }

    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| ApiStateError::Validation {
            message: "GatewayConfig not provided".into(),
            context: None,
        })?;
        let backend = self.backend.ok_or_else(|| ApiStateError::Validation {
            message: "BackendClient not provided".into(),
            context: None,
        })?;

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, backend, slices: self.slices }) })
    }
}

use super::*;

// Functions for creating and querying the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates a state with no tokens.
    pub fn new(state_builder: &mut StateBuilder<S>, params: InitParams) -> Self {
        Self {
            layer: LayerState::new(state_builder, params.name, params.symbol, params.minter),
        }
    }
}

impl<S: HasStateApi> HasLayer<S> for State<S> {
    fn layer(&self) -> &LayerState<S> {
        &self.layer
    }

    fn layer_mut(&mut self) -> &mut LayerState<S> {
        &mut self.layer
    }
}

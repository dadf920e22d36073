
use winit::dpi::PhysicalSize;
use winit_input_helper::WinitInputHelper;

use crate::framework::clock::Tick;

// Contexts
// -------------

pub struct UpdateContext<'a, Scene> {
    pub scene: &'a mut Scene,
    pub input: &'a WinitInputHelper,
    pub tick:  &'a Tick,
}

pub struct ResizeContext<'a, Scene> {
    pub scene:        &'a mut Scene,
    pub size:         &'a PhysicalSize<u32>,
    pub scale_factor: f64,
}

// UpdaterModule
// -------------

pub trait UpdaterModule<Scene> {
    /// Reacts to input which arrived between frames, returns true when the input was consumed.
    fn input(&mut self, context: &mut UpdateContext<Scene>) -> bool;

    /// Invoked once per frame before the scene is rendered.
    fn update(&mut self, context: &mut UpdateContext<Scene>);

    fn resize(&mut self, context: &mut ResizeContext<Scene>);
}

// Updater
// -------

pub struct Updater<Scene> {
    modules: Vec<Box<dyn UpdaterModule<Scene>>>,
    pub update_cnt: u64,
    pub input_cnt: u64,
}

impl<Scene> Updater<Scene> {
    pub fn new() -> Self {
        Self {
            modules: vec![],
            update_cnt: 0,
            input_cnt: 0,
        }
    }

    pub fn with_module<M>(mut self, module: M) -> Self
    where
        M: UpdaterModule<Scene> + 'static
    {
        self.modules.push(Box::new(module));
        self
    }

    /// Invoked when input has changed, modules after the one consuming the input do not see it
    #[profiler::function]
    pub fn input(&mut self, mut context: UpdateContext<Scene>) {
        for module in self.modules.iter_mut() {
            if module.input(&mut context) {
                break;
            }
        }
        self.input_cnt += 1;
    }

    /// Invoked on every frame
    #[profiler::function]
    pub fn update(&mut self, mut context: UpdateContext<Scene>) {
        for module in self.modules.iter_mut() {
            module.update(&mut context);
        }
        self.update_cnt += 1;
    }

    /// React to resize event
    #[profiler::function]
    pub fn resize(&mut self, mut context: ResizeContext<Scene>) {
        for module in self.modules.iter_mut() {
            module.resize(&mut context);
        }
    }
}

pub mod ballistics;
pub mod plot;
pub mod render_loop;
pub mod stepper;
pub mod surface;
pub mod timer;
pub mod window;

mod app;

fn main() {
    let args = app::common::translate_args_for_iccma(std::env::args_os());
    app::common::create_app_helper().launch_app_with_args(args);
}

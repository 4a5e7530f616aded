use mahjong_engine::app::CalculatorApp;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    CalculatorApp::new(args).run();
}

// mainから直接呼び出すアプリケーションのモジュール

mod calculator;

pub use calculator::CalculatorApp;

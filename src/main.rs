fn main() {
    folio::app::cli::run();
}

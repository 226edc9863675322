fn main() {
    httpclient::cli::run();
}

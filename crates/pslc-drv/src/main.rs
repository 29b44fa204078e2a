use pslc_drv::DriverError;

fn main() {
    if let Err(e) = pslc_drv::run() {
        match e {
            DriverError::Compile(e) => pslc_util::diagnostic::report(&e),
            other => println!("{other}"),
        }
        std::process::exit(1);
    }
}

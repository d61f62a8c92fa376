const LOGO: &'static str = "
        ┓┏┏┓┳┓┏┓┓ ┳┓
        ┣┫┣ ┣┫┣┫┃ ┃┃
        ┛┗┗┛┛┗┛┗┗┛┻┛";

pub fn banner() {
    let mut output = String::from("\n");
    output = output + format!("{}", LOGO).as_str();
    output = output + "\n";
    output = output + "      MULTI-PORT GREETER\n";
    output = output + "\n";

    println!("\x1b[38;5;101m{}\x1b[0m", output);
}

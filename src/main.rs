fn main() {
    pollster::block_on(crewboard::run());
}

mod presses;

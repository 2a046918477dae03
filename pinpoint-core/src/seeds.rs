use pinpoint_types::LatLng;

/// City centres used to generate round candidates. Each draw is jittered, so
/// these are starting points for a panorama search rather than targets.
pub const WORLD_CITIES: &[LatLng] = &[
    // Europe
    LatLng::new(48.8566, 2.3522),   // Paris
    LatLng::new(51.5074, -0.1278),  // London
    LatLng::new(52.5200, 13.4050),  // Berlin
    LatLng::new(41.3851, 2.1734),   // Barcelona
    LatLng::new(40.4168, -3.7038),  // Madrid
    LatLng::new(38.7223, -9.1393),  // Lisbon
    LatLng::new(45.4642, 9.1900),   // Milan
    LatLng::new(41.9028, 12.4964),  // Rome
    LatLng::new(52.3676, 4.9041),   // Amsterdam
    LatLng::new(50.8503, 4.3517),   // Brussels
    LatLng::new(47.3769, 8.5417),   // Zurich
    LatLng::new(48.2082, 16.3738),  // Vienna
    LatLng::new(50.0755, 14.4378),  // Prague
    LatLng::new(47.4979, 19.0402),  // Budapest
    LatLng::new(52.2297, 21.0122),  // Warsaw
    LatLng::new(50.0647, 19.9450),  // Krakow
    LatLng::new(59.3293, 18.0686),  // Stockholm
    LatLng::new(55.6761, 12.5683),  // Copenhagen
    LatLng::new(59.9139, 10.7522),  // Oslo
    LatLng::new(60.1699, 24.9384),  // Helsinki
    LatLng::new(59.4370, 24.7536),  // Tallinn
    LatLng::new(56.9496, 24.1052),  // Riga
    LatLng::new(54.6872, 25.2797),  // Vilnius
    LatLng::new(64.1466, -21.9426), // Reykjavik
    LatLng::new(69.6492, 18.9553),  // Tromso
    LatLng::new(78.2232, 15.6267),  // Longyearbyen
    LatLng::new(55.9533, -3.1883),  // Edinburgh
    LatLng::new(53.3498, -6.2603),  // Dublin
    LatLng::new(43.2965, 5.3698),   // Marseille
    LatLng::new(45.7640, 4.8357),   // Lyon
    LatLng::new(44.8378, -0.5792),  // Bordeaux
    LatLng::new(53.5511, 9.9937),   // Hamburg
    LatLng::new(48.1351, 11.5820),  // Munich
    LatLng::new(37.9838, 23.7275),  // Athens
    LatLng::new(41.0082, 28.9784),  // Istanbul
    LatLng::new(44.4268, 26.1025),  // Bucharest
    LatLng::new(42.6977, 23.3219),  // Sofia
    LatLng::new(44.7866, 20.4489),  // Belgrade
    LatLng::new(45.8150, 15.9819),  // Zagreb
    LatLng::new(50.4501, 30.5234),  // Kyiv
    LatLng::new(49.8397, 24.0297),  // Lviv
    LatLng::new(55.7558, 37.6173),  // Moscow
    // Caucasus and Middle East
    LatLng::new(41.7151, 44.8271),  // Tbilisi
    LatLng::new(40.1792, 44.4991),  // Yerevan
    LatLng::new(40.4093, 49.8671),  // Baku
    LatLng::new(31.7683, 35.2137),  // Jerusalem
    LatLng::new(31.9454, 35.9284),  // Amman
    LatLng::new(25.2048, 55.2708),  // Dubai
    LatLng::new(25.2854, 51.5310),  // Doha
    LatLng::new(24.7136, 46.6753),  // Riyadh
    // Asia
    LatLng::new(35.6762, 139.6503), // Tokyo
    LatLng::new(34.6937, 135.5023), // Osaka
    LatLng::new(43.0618, 141.3545), // Sapporo
    LatLng::new(37.5665, 126.9780), // Seoul
    LatLng::new(35.1796, 129.0756), // Busan
    LatLng::new(25.0330, 121.5654), // Taipei
    LatLng::new(22.3193, 114.1694), // Hong Kong
    LatLng::new(13.7563, 100.5018), // Bangkok
    LatLng::new(18.7883, 98.9853),  // Chiang Mai
    LatLng::new(1.3521, 103.8198),  // Singapore
    LatLng::new(3.1390, 101.6869),  // Kuala Lumpur
    LatLng::new(-6.2088, 106.8456), // Jakarta
    LatLng::new(-8.4095, 115.1889), // Bali
    LatLng::new(14.5995, 120.9842), // Manila
    LatLng::new(21.0278, 105.8342), // Hanoi
    LatLng::new(10.8231, 106.6297), // Ho Chi Minh City
    LatLng::new(11.5564, 104.9282), // Phnom Penh
    LatLng::new(19.0760, 72.8777),  // Mumbai
    LatLng::new(28.6139, 77.2090),  // New Delhi
    LatLng::new(12.9716, 77.5946),  // Bengaluru
    LatLng::new(6.9271, 79.8612),   // Colombo
    LatLng::new(27.7172, 85.3240),  // Kathmandu
    LatLng::new(23.8103, 90.4125),  // Dhaka
    LatLng::new(47.8864, 106.9057), // Ulaanbaatar
    LatLng::new(43.2220, 76.8512),  // Almaty
    // Africa
    LatLng::new(-33.9249, 18.4241), // Cape Town
    LatLng::new(-26.2041, 28.0473), // Johannesburg
    LatLng::new(-1.2921, 36.8219),  // Nairobi
    LatLng::new(-1.9441, 30.0619),  // Kigali
    LatLng::new(0.3476, 32.5825),   // Kampala
    LatLng::new(5.6037, -0.1870),   // Accra
    LatLng::new(14.7167, -17.4677), // Dakar
    LatLng::new(33.5731, -7.5898),  // Casablanca
    LatLng::new(36.8065, 10.1815),  // Tunis
    LatLng::new(-24.6282, 25.9231), // Gaborone
    LatLng::new(-22.5609, 17.0658), // Windhoek
    // North America
    LatLng::new(40.7128, -74.0060),  // New York
    LatLng::new(42.3601, -71.0589),  // Boston
    LatLng::new(41.8781, -87.6298),  // Chicago
    LatLng::new(29.7604, -95.3698),  // Houston
    LatLng::new(39.7392, -104.9903), // Denver
    LatLng::new(33.4484, -112.0740), // Phoenix
    LatLng::new(34.0522, -118.2437), // Los Angeles
    LatLng::new(37.7749, -122.4194), // San Francisco
    LatLng::new(47.6062, -122.3321), // Seattle
    LatLng::new(25.7617, -80.1918),  // Miami
    LatLng::new(61.2181, -149.9003), // Anchorage
    LatLng::new(21.3069, -157.8583), // Honolulu
    LatLng::new(43.6532, -79.3832),  // Toronto
    LatLng::new(45.5017, -73.5673),  // Montreal
    LatLng::new(49.2827, -123.1207), // Vancouver
    LatLng::new(19.4326, -99.1332),  // Mexico City
    LatLng::new(20.6597, -103.3496), // Guadalajara
    // South America
    LatLng::new(-23.5505, -46.6333), // Sao Paulo
    LatLng::new(-22.9068, -43.1729), // Rio de Janeiro
    LatLng::new(-34.6037, -58.3816), // Buenos Aires
    LatLng::new(-33.4489, -70.6693), // Santiago
    LatLng::new(-12.0464, -77.0428), // Lima
    LatLng::new(4.7110, -74.0721),   // Bogota
    LatLng::new(-0.1807, -78.4678),  // Quito
    LatLng::new(-34.9011, -56.1645), // Montevideo
    // Oceania
    LatLng::new(-33.8688, 151.2093), // Sydney
    LatLng::new(-37.8136, 144.9631), // Melbourne
    LatLng::new(-31.9505, 115.8605), // Perth
    LatLng::new(-27.4698, 153.0251), // Brisbane
    LatLng::new(-36.8485, 174.7633), // Auckland
    LatLng::new(-41.2865, 174.7762), // Wellington
    LatLng::new(-43.5321, 172.6362), // Christchurch
];

/// Known-good panorama spots used when no candidate resolves.
pub const FAMOUS_LOCATIONS: &[LatLng] = &[
    LatLng::new(48.8584, 2.2945),    // Eiffel Tower, Paris
    LatLng::new(40.6892, -74.0445),  // Statue of Liberty, New York
    LatLng::new(51.5007, -0.1246),   // Westminster, London
    LatLng::new(35.6595, 139.7005),  // Shibuya Crossing, Tokyo
    LatLng::new(-33.8568, 151.2153), // Sydney Opera House
    LatLng::new(55.7539, 37.6208),   // Red Square, Moscow
    LatLng::new(41.8902, 12.4922),   // Colosseum, Rome
    LatLng::new(52.5163, 13.3777),   // Brandenburg Gate, Berlin
    LatLng::new(37.8199, -122.4783), // Golden Gate Bridge, San Francisco
    LatLng::new(-22.9519, -43.2105), // Christ the Redeemer, Rio de Janeiro
    LatLng::new(1.2834, 103.8607),   // Marina Bay, Singapore
    LatLng::new(25.1972, 55.2744),   // Burj Khalifa, Dubai
    LatLng::new(48.1374, 11.5755),   // Marienplatz, Munich
    LatLng::new(59.9075, 10.7531),   // Opera House, Oslo
    LatLng::new(60.1695, 24.9525),   // Senate Square, Helsinki
    LatLng::new(59.3251, 18.0711),   // Gamla Stan, Stockholm
    LatLng::new(55.6805, 12.5908),   // Nyhavn, Copenhagen
    LatLng::new(52.3731, 4.8922),    // Dam Square, Amsterdam
    LatLng::new(48.2086, 16.3731),   // St. Stephen's Cathedral, Vienna
    LatLng::new(47.5070, 19.0456),   // Parliament, Budapest
];
